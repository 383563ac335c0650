use assert_cmd::Command;
use assert_cmd::cargo_bin;
use predicates::prelude::*;

fn console() -> Command {
    let mut cmd = Command::new(cargo_bin!("merchant-console"));
    cmd.env_remove("RUST_LOG")
        .env_remove("PAYMENT_GATEWAY_URL")
        .args(["--gateway-url", "http://127.0.0.1:9", "--timeout-secs", "2"]);
    cmd
}

#[test]
fn test_lists_shoppers_masked() {
    console()
        .write_stdin("shoppers\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("shopper 0 - ****-****-****-4444"))
        .stdout(predicate::str::contains("shopper 5 - ****-****-****-2020"))
        .stdout(predicate::str::contains("1111-2222").not());
}

#[test]
fn test_pay_requires_login() {
    console()
        .write_stdin("pay 0 USD 100\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("not authenticated"))
        .stdout(predicate::str::contains("no previous requests"));
}

#[test]
fn test_form_validation_messages() {
    console()
        .write_stdin("pay 3 USD 100\npay 0 USD -5\npay 0 CHF 1\nbogus\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("no shopper selected"))
        .stdout(predicate::str::contains("invalid amount"))
        .stdout(predicate::str::contains("unsupported currency: CHF"))
        .stdout(predicate::str::contains("unknown command `bogus`"));
}

#[test]
fn test_login_against_unreachable_gateway() {
    console()
        .write_stdin("login merchant1 secret\nwhoami\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("login failed"))
        .stdout(predicate::str::contains("not logged in"));
}
