use crate::error::Result;
use crate::git::Committer;
use crate::prompt::Prompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// The commit command ran but failed; the failure is not reported as an error
    CommitFailed,
    Declined,
}

/// Ask for confirmation and commit with `message` when the answer is `y`
pub fn confirm_and_commit(
    message: &str,
    prompt: &mut impl Prompt,
    committer: &impl Committer,
) -> Result<CommitOutcome> {
    let answer = prompt.ask("Submit your commit? (Y/N) ")?;

    if !answer.eq_ignore_ascii_case("y") {
        return Ok(CommitOutcome::Declined);
    }

    match committer.commit(message) {
        Ok(()) => Ok(CommitOutcome::Committed),
        Err(e) => {
            // e.g. "nothing to commit"; git already printed its own output
            tracing::warn!(error = %e, "git commit failed");
            Ok(CommitOutcome::CommitFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::prompt::scripted::ScriptedPrompt;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingCommitter {
        messages: RefCell<Vec<String>>,
        fail: bool,
    }

    impl Committer for RecordingCommitter {
        fn commit(&self, message: &str) -> Result<()> {
            self.messages.borrow_mut().push(message.to_string());
            if self.fail {
                return Err(Error::Io(std::io::Error::other("nothing to commit")));
            }
            Ok(())
        }
    }

    #[test]
    fn test_yes_commits_message() {
        for answer in ["y", "Y", " y "] {
            let mut prompt = ScriptedPrompt::new(&[answer]);
            let committer = RecordingCommitter::default();

            let outcome = confirm_and_commit("[A][B-1]: C", &mut prompt, &committer).unwrap();

            assert_eq!(outcome, CommitOutcome::Committed);
            assert_eq!(*committer.messages.borrow(), vec!["[A][B-1]: C"]);
            assert_eq!(prompt.asked, vec!["Submit your commit? (Y/N) "]);
        }
    }

    #[test]
    fn test_anything_else_declines() {
        for answer in ["n", "", "yes", "no"] {
            let mut prompt = ScriptedPrompt::new(&[answer]);
            let committer = RecordingCommitter::default();

            let outcome = confirm_and_commit("msg", &mut prompt, &committer).unwrap();

            assert_eq!(outcome, CommitOutcome::Declined);
            assert!(committer.messages.borrow().is_empty());
        }
    }

    #[test]
    fn test_commit_failure_is_swallowed() {
        let mut prompt = ScriptedPrompt::new(&["y"]);
        let committer = RecordingCommitter {
            fail: true,
            ..Default::default()
        };

        let outcome = confirm_and_commit("msg", &mut prompt, &committer).unwrap();
        assert_eq!(outcome, CommitOutcome::CommitFailed);
    }

    #[test]
    fn test_closed_input_aborts_without_commit() {
        let mut prompt = ScriptedPrompt::new(&[]);
        let committer = RecordingCommitter::default();

        let result = confirm_and_commit("msg", &mut prompt, &committer);

        assert!(matches!(result, Err(Error::Aborted)));
        assert!(committer.messages.borrow().is_empty());
    }
}
