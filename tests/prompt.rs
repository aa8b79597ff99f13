use std::collections::VecDeque;

use espman::error::{EspError, EspResult};
use espman::prompt::{PromptSource, confirm, select_port};

struct ScriptedPrompt {
    answers: VecDeque<String>,
}

impl ScriptedPrompt {
    fn new(answers: &[&str]) -> Self {
        ScriptedPrompt {
            answers: answers.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PromptSource for ScriptedPrompt {
    fn ask(&mut self, _message: &str) -> EspResult<String> {
        self.answers.pop_front().ok_or(EspError::Cancelled)
    }
}

fn ports(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn valid_selection_returns_the_port() {
    let ports = ports(&["/dev/ttyUSB0", "/dev/ttyUSB1"]);
    let mut prompt = ScriptedPrompt::new(&["1"]);

    assert_eq!(select_port(&ports, &mut prompt).unwrap(), "/dev/ttyUSB0");
}

#[test]
fn invalid_selections_are_reprompted() {
    let ports = ports(&["/dev/ttyUSB0", "/dev/ttyUSB1", "/dev/ttyUSB2"]);
    let mut prompt = ScriptedPrompt::new(&["0", "nine", "4", "2"]);

    assert_eq!(select_port(&ports, &mut prompt).unwrap(), "/dev/ttyUSB1");
}

#[test]
fn exhausted_input_cancels_selection() {
    let ports = ports(&["/dev/ttyUSB0", "/dev/ttyUSB1"]);
    let mut prompt = ScriptedPrompt::new(&["7"]);

    assert!(matches!(
        select_port(&ports, &mut prompt),
        Err(EspError::Cancelled)
    ));
}

#[test]
fn only_an_explicit_y_confirms() {
    for (answer, expected) in [("y", true), ("Y", true), ("", false), ("n", false), ("yes", false)] {
        let mut prompt = ScriptedPrompt::new(&[answer]);
        assert_eq!(confirm("Continue anyway? (y/N): ", &mut prompt).unwrap(), expected);
    }
}
