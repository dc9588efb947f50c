use crate::i18n::{Locale, Message};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputType {
    Password,
    Text,
}

impl InputType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Text => "text",
        }
    }
}

/// Show/hide control next to a password input. Its only state is the input's type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordToggle {
    pub input_type: InputType,
    pub icon: &'static str,
    pub aria_label: &'static str,
    locale: Locale,
}

impl PasswordToggle {
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            input_type: InputType::Password,
            icon: "fa-solid fa-eye",
            aria_label: Message::ShowPassword.text(locale),
            locale,
        }
    }

    pub fn toggle(&mut self) {
        match self.input_type {
            InputType::Password => {
                self.input_type = InputType::Text;
                self.icon = "fa-solid fa-eye-slash";
                self.aria_label = Message::HidePassword.text(self.locale);
            }
            InputType::Text => {
                self.input_type = InputType::Password;
                self.icon = "fa-solid fa-eye";
                self.aria_label = Message::ShowPassword.text(self.locale);
            }
        }
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.input_type == InputType::Text
    }
}
