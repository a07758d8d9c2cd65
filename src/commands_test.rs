use super::*;

#[test]
fn plain_text_is_a_question() {
    assert_eq!(parse_command("  What is 2+2?  "), Command::Ask("What is 2+2?".to_owned()));
}

#[test]
fn blank_line_is_an_empty_question() {
    assert_eq!(parse_command("   "), Command::Ask(String::new()));
}

#[test]
fn login_splits_username_and_password() {
    assert_eq!(
        parse_command("/login alice  s3cret pass"),
        Command::Login { username: "alice".to_owned(), password: "s3cret pass".to_owned() }
    );
}

#[test]
fn login_missing_arguments_are_empty() {
    assert_eq!(parse_command("/login"), Command::Login { username: String::new(), password: String::new() });
    assert_eq!(
        parse_command("/login alice"),
        Command::Login { username: "alice".to_owned(), password: String::new() }
    );
}

#[test]
fn command_names_are_case_insensitive() {
    assert_eq!(parse_command("/CLEAR"), Command::ClearContext);
    assert_eq!(parse_command("/Quit"), Command::Quit);
}

#[test]
fn simple_commands() {
    assert_eq!(parse_command("/signin"), Command::OpenLogin);
    assert_eq!(parse_command("/close"), Command::CloseLogin);
    assert_eq!(parse_command("/context"), Command::RefreshContext);
    assert_eq!(parse_command("/reset"), Command::ResetAnswer);
    assert_eq!(parse_command("/help"), Command::Help);
    assert_eq!(parse_command("/exit"), Command::Quit);
}

#[test]
fn unknown_command_is_reported() {
    assert_eq!(parse_command("/frobnicate now"), Command::Unknown("frobnicate".to_owned()));
}
