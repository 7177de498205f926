/// Phrases a status line shows once the recorder has stopped.
const FINISHED_PHRASES: [&str; 3] = ["finished", "review", "processing complete"];

/// Something observed in the source context that may end dictation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopSignal {
    StopPressed,
    StatusText(String),
}

impl StopSignal {
    pub fn is_stop(&self) -> bool {
        match self {
            StopSignal::StopPressed => true,
            StopSignal::StatusText(text) => {
                let text = text.to_lowercase();
                FINISHED_PHRASES.iter().any(|phrase| text.contains(phrase))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_phrases() {
        assert!(StopSignal::StopPressed.is_stop());
        assert!(StopSignal::StatusText("Recording finished".into()).is_stop());
        assert!(StopSignal::StatusText("Ready for REVIEW".into()).is_stop());
        assert!(!StopSignal::StatusText("Listening...".into()).is_stop());
    }
}
