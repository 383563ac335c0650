/// An authenticated operator and the bearer credential issued at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    operator: String,
    credential: String,
}

impl Session {
    pub fn new(operator: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            credential: credential.into(),
        }
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }
}
