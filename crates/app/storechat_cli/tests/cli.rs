use assert_cmd::Command;
use predicates::prelude::*;

fn storechat() -> Command {
    let mut cmd = Command::cargo_bin("storechat").expect("binary built");
    cmd.env_remove("RUST_LOG")
        .env_remove("STORECHAT_BACKEND_URL")
        .env_remove("STORECHAT_REPLY_DELAY_MS")
        .env_remove("STORECHAT_REPLY_TIMEOUT_SECS");
    cmd
}

#[test]
fn version_prints_name_and_version() {
    storechat()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!(
            "storechat_cli ",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn ask_free_gifts_prints_gift_offer() {
    storechat()
        .args(["ask", "Tell", "me", "about", "free", "gifts"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "free mystery gift with every order over $50",
        ));
}

#[test]
fn ask_unmatched_prints_fallback() {
    storechat()
        .args(["ask", "what colours do you stock"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Thanks for your message!"));
}

#[test]
fn ask_requires_text() {
    storechat().arg("ask").assert().failure();
}

#[test]
fn chat_shows_welcome_and_offers() {
    storechat()
        .arg("chat")
        .write_stdin("/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Store Assistant"))
        .stdout(predicate::str::contains("code WELCOME20"))
        .stdout(predicate::str::contains("Free gift with orders over $50"));
}

#[test]
fn chat_echoes_user_turn_and_typing() {
    storechat()
        .args(["chat", "--delay-ms", "0"])
        .write_stdin("shipping?\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("You: shipping?"))
        .stdout(predicate::str::contains("is typing..."))
        .stdout(predicate::str::contains("Standard shipping: $5.99"));
}

#[test]
fn chat_rejects_zero_timeout() {
    storechat()
        .args(["chat", "--timeout-secs", "0"])
        .write_stdin("/quit\n")
        .assert()
        .failure();
}

#[test]
fn chat_rejects_bad_delay() {
    storechat()
        .args(["chat", "--delay-ms", "soon"])
        .write_stdin("/quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --delay-ms"));
}
