use std::fs;

use services::{
    Console, ConsoleError, RecordingSink, ScriptedSource, Session, SessionConfig, SessionError,
};

const PROMPT: &str =
    "Input the action (add, remove, import, export, ask, exit, log, hardest card, reset stats):";

fn scripted_session<I, S>(script: I, config: SessionConfig) -> (Session, RecordingSink)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let sink = RecordingSink::new();
    let console = Console::new(Box::new(ScriptedSource::new(script)), Box::new(sink.clone()));
    (Session::new(console, config), sink)
}

fn run_session<I, S>(script: I) -> (Session, RecordingSink)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let (mut session, sink) = scripted_session(script, SessionConfig::default());
    session.run().unwrap();
    (session, sink)
}

#[test]
fn add_ask_exit_produces_the_exact_output() {
    let (_session, sink) = run_session(["add", "capital", "Paris", "ask", "1", "Paris", "exit"]);

    assert_eq!(
        sink.lines(),
        [
            PROMPT,
            "The card:",
            "The definition of the card:",
            "The pair (\"capital\":\"Paris\") has been added.",
            "",
            PROMPT,
            "How many times to ask?",
            "Print the definition of \"capital\":",
            "Correct answer.",
            "",
            PROMPT,
            "Bye bye!",
        ]
    );
}

#[test]
fn transcript_records_inputs_but_never_the_exit_line() {
    let (session, _sink) = run_session(["add", "capital", "Paris", "exit"]);

    assert_eq!(
        session.transcript(),
        [
            PROMPT,
            "> add",
            "The card:",
            "> capital",
            "The definition of the card:",
            "> Paris",
            "The pair (\"capital\":\"Paris\") has been added.",
            "",
            PROMPT,
            "Bye bye!",
        ]
    );
}

#[test]
fn duplicate_term_stops_before_the_definition_prompt() {
    let (session, sink) = run_session([
        "add", "capital", "Paris", "add", "capital", "add", "trick", "Paris", "exit",
    ]);

    let lines = sink.lines();
    assert!(lines.contains(&"The card \"capital\" already exists.".to_owned()));
    assert!(lines.contains(&"The definition \"Paris\" already exists.".to_owned()));
    // the second add never asked for a definition
    let definition_prompts = lines
        .iter()
        .filter(|line| *line == "The definition of the card:")
        .count();
    assert_eq!(definition_prompts, 2);
    assert_eq!(session.deck().len(), 1);
}

#[test]
fn remove_reports_missing_cards() {
    let (session, sink) = run_session(["add", "a", "1", "remove", "a", "remove", "a", "exit"]);

    let lines = sink.lines();
    assert!(lines.contains(&"The card has been removed.".to_owned()));
    assert!(lines.contains(&"Can't remove \"a\": there is no such card.".to_owned()));
    assert!(session.deck().is_empty());
}

#[test]
fn unrecognized_command_reprompts_after_a_blank_line() {
    let (_session, sink) = run_session(["definitely not a command", "exit"]);

    assert_eq!(sink.lines(), [PROMPT, "", PROMPT, "Bye bye!"]);
}

#[test]
fn exit_mid_prompt_abandons_the_command() {
    let (session, sink) = run_session(["add", "exit"]);

    assert_eq!(sink.lines(), [PROMPT, "The card:", "Bye bye!"]);
    assert!(session.deck().is_empty());
}

#[test]
fn exit_as_a_quiz_answer_is_not_graded() {
    let (session, sink) = run_session(["add", "capital", "Paris", "ask", "2", "exit"]);

    assert_eq!(
        sink.lines(),
        [
            PROMPT,
            "The card:",
            "The definition of the card:",
            "The pair (\"capital\":\"Paris\") has been added.",
            "",
            PROMPT,
            "How many times to ask?",
            "Print the definition of \"capital\":",
            "Bye bye!",
        ]
    );
    assert_eq!(session.deck().error_count("capital"), Some(0));
}

#[test]
fn wrong_answer_names_the_card_it_belongs_to() {
    let (session, sink) = run_session([
        "add", "capital", "Paris", "add", "currency", "Euro", "ask", "2", "Euro", "Franc", "exit",
    ]);

    let lines = sink.lines();
    assert!(lines.contains(
        &"Wrong answer. The correct one is \"Paris\", you've just written the definition of \"currency\"."
            .to_owned()
    ));
    assert!(lines.contains(&"Wrong answer. The correct one is \"Euro\".".to_owned()));
    assert_eq!(session.deck().error_count("capital"), Some(1));
    assert_eq!(session.deck().error_count("currency"), Some(1));
}

#[test]
fn ask_with_no_cards_asks_nothing() {
    let (_session, sink) = run_session(["ask", "5", "exit"]);

    assert_eq!(
        sink.lines(),
        [
            PROMPT,
            "How many times to ask?",
            "Create a card first",
            "",
            PROMPT,
            "Bye bye!",
        ]
    );
}

#[test]
fn ask_cycles_the_deck_in_order_when_count_exceeds_it() {
    let (_session, sink) = run_session([
        "add", "a", "1", "add", "b", "2", "ask", "5", "1", "2", "1", "2", "1", "exit",
    ]);

    let asked: Vec<_> = sink
        .lines()
        .into_iter()
        .filter(|line| line.starts_with("Print the definition of "))
        .collect();
    assert_eq!(
        asked,
        [
            "Print the definition of \"a\":",
            "Print the definition of \"b\":",
            "Print the definition of \"a\":",
            "Print the definition of \"b\":",
            "Print the definition of \"a\":",
        ]
    );
}

#[test]
fn an_enormous_question_count_is_asked_one_card_at_a_time() {
    let (session, sink) = run_session([
        "add",
        "capital",
        "Paris",
        "ask",
        "18446744073709551615",
        "Paris",
        "exit",
    ]);

    let lines = sink.lines();
    assert!(lines.contains(&"Correct answer.".to_owned()));
    assert_eq!(lines[lines.len() - 1], "Bye bye!");
    assert_eq!(session.deck().error_count("capital"), Some(0));
}

#[test]
fn non_numeric_question_count_is_fatal() {
    let (mut session, _sink) = scripted_session(["ask", "three"], SessionConfig::default());

    let err = session.run().unwrap_err();
    assert!(matches!(err, SessionError::InvalidCount(raw) if raw == "three"));
}

#[test]
fn exhausted_input_without_exit_is_fatal() {
    let (mut session, _sink) = scripted_session(["add"], SessionConfig::default());

    let err = session.run().unwrap_err();
    assert!(matches!(
        err,
        SessionError::Console(ConsoleError::Ended)
    ));
}

#[test]
fn hardest_card_reports_ties_and_reset_clears_them() {
    let (_session, sink) = run_session([
        "add",
        "a",
        "1",
        "add",
        "b",
        "2",
        "ask",
        "4",
        "x",
        "x",
        "x",
        "x",
        "hardest card",
        "reset stats",
        "hardest card",
        "exit",
    ]);

    let lines = sink.lines();
    assert!(lines.contains(
        &"The hardest cards are \"a\", \"b\". You have 2 errors answering them.".to_owned()
    ));
    assert!(lines.contains(&"Card statistics has been reset.".to_owned()));
    assert!(lines.contains(&"There are no cards with errors.".to_owned()));
}

#[test]
fn hardest_card_with_a_single_leader_names_it() {
    let (_session, sink) = run_session([
        "add",
        "capital",
        "Paris",
        "ask",
        "1",
        "wrong",
        "hardest card",
        "exit",
    ]);

    assert!(sink.lines().contains(
        &"The hardest card is \"capital\". You have 1 errors answering it.".to_owned()
    ));
}

#[test]
fn interactive_import_loads_counts_and_stats() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.txt");
    fs::write(&path, "capital :: Paris :: 0\ncurrency :: Euro :: 2\n").unwrap();

    let (session, sink) = run_session(["import", path.to_str().unwrap(), "exit"]);

    assert!(sink.lines().contains(&"2 cards have been loaded.".to_owned()));
    assert_eq!(session.deck().len(), 2);
    assert_eq!(session.deck().error_count("currency"), Some(2));
}

#[test]
fn interactive_import_of_a_missing_file_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");

    let (session, sink) = run_session(["import", path.to_str().unwrap(), "exit"]);

    assert_eq!(
        sink.lines(),
        [PROMPT, "File name:", "File not found.", "", PROMPT, "Bye bye!"]
    );
    assert!(session.deck().is_empty());
}

#[test]
fn export_writes_the_deck_and_reports_the_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let (_session, sink) = run_session([
        "add",
        "capital",
        "Paris",
        "export",
        path.to_str().unwrap(),
        "exit",
    ]);

    assert!(sink.lines().contains(&"1 cards have been saved.".to_owned()));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "capital :: Paris :: 0\n"
    );
}

#[test]
fn log_saves_the_transcript_so_far_without_its_own_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.log");

    let (_session, sink) = run_session(["log", path.to_str().unwrap(), "exit"]);

    assert!(sink.lines().contains(&"The log has been saved.".to_owned()));
    let expected = format!(
        "{PROMPT}\n> log\nFile name:\n> {}\n",
        path.to_str().unwrap()
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn startup_import_loads_before_the_first_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.txt");
    fs::write(&path, "capital :: Paris :: 1\n").unwrap();

    let config = SessionConfig {
        import_path: Some(path),
        export_path: None,
    };
    let (mut session, sink) = scripted_session(["exit"], config);
    session.run().unwrap();

    assert_eq!(
        sink.lines(),
        ["1 cards have been loaded.", PROMPT, "Bye bye!"]
    );
    assert_eq!(session.deck().error_count("capital"), Some(1));
}

#[test]
fn startup_import_of_a_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = SessionConfig {
        import_path: Some(dir.path().join("absent.txt")),
        export_path: None,
    };

    let (mut session, sink) = scripted_session(["exit"], config);
    assert!(session.run().is_err());
    assert!(sink.lines().is_empty());
}

#[test]
fn exit_exports_to_the_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");

    let config = SessionConfig {
        import_path: None,
        export_path: Some(path.clone()),
    };
    let (mut session, sink) = scripted_session(["add", "a", "1", "exit"], config);
    session.run().unwrap();

    let lines = sink.lines();
    assert_eq!(lines[lines.len() - 2], "Bye bye!");
    assert_eq!(lines[lines.len() - 1], "1 cards have been saved.");
    assert_eq!(fs::read_to_string(&path).unwrap(), "a :: 1 :: 0\n");
}

#[test]
fn import_overwrites_a_card_added_in_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.txt");
    fs::write(&path, "capital :: Paris :: 3\n").unwrap();

    let (session, _sink) = run_session([
        "add",
        "capital",
        "Lyon",
        "import",
        path.to_str().unwrap(),
        "exit",
    ]);

    assert_eq!(session.deck().len(), 1);
    assert_eq!(
        session.deck().find_by_term("capital").unwrap().definition(),
        "Paris"
    );
    assert_eq!(session.deck().error_count("capital"), Some(3));
}
