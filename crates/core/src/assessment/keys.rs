/// Keys the assessment reacts to, decoupled from any UI toolkit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    ArrowLeft,
    ArrowRight,
    Other,
}

/// What a key press asks the session to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Select(usize),
    Previous,
    Next,
}

impl KeyInput {
    /// Digits `1`..`4` select options 0..3; arrows navigate. Nothing else is
    /// bound.
    #[must_use]
    pub fn command(self) -> Option<KeyCommand> {
        match self {
            KeyInput::Char(ch @ '1'..='4') => {
                let digit = ch.to_digit(10)?;
                usize::try_from(digit - 1).ok().map(KeyCommand::Select)
            }
            KeyInput::ArrowLeft => Some(KeyCommand::Previous),
            KeyInput::ArrowRight => Some(KeyCommand::Next),
            KeyInput::Char(_) | KeyInput::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_digits_and_arrows() {
        assert_eq!(KeyInput::Char('1').command(), Some(KeyCommand::Select(0)));
        assert_eq!(KeyInput::Char('4').command(), Some(KeyCommand::Select(3)));
        assert_eq!(KeyInput::ArrowLeft.command(), Some(KeyCommand::Previous));
        assert_eq!(KeyInput::ArrowRight.command(), Some(KeyCommand::Next));
    }

    #[test]
    fn ignores_unbound_keys() {
        assert_eq!(KeyInput::Char('0').command(), None);
        assert_eq!(KeyInput::Char('5').command(), None);
        assert_eq!(KeyInput::Char('r').command(), None);
        assert_eq!(KeyInput::Other.command(), None);
    }
}
