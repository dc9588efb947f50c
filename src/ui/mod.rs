//! Headless page models. Each struct mirrors the handful of elements a page script
//! reads from or writes to, so flow controllers can run without a rendered page and
//! the terminal front end can print whatever ended up visible.

mod password_toggle;

pub use password_toggle::{InputType, PasswordToggle};

use crate::validation::FieldErrors;

/// Number of discrete cells the SMS code is typed into.
pub const CODE_CELLS: usize = 6;

/// A text input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub value: String,
    pub focused: bool,
}

impl Input {
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            focused: false,
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// A text target that is hidden while empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub visible: bool,
}

impl Label {
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.visible = true;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.visible = false;
    }

    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.visible && !self.text.is_empty()
    }
}

/// A clickable control.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub disabled: bool,
}

impl Button {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
        }
    }
}

/// The six single-digit inputs of the code form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeCells {
    pub cells: [Input; CODE_CELLS],
}

impl CodeCells {
    /// Distributes `code` one character per cell. Anything past the last cell lands in
    /// the last cell so that an overlong code still fails validation.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        let mut cells = Self::default();
        for (index, character) in code.chars().enumerate() {
            let slot = index.min(CODE_CELLS - 1);
            cells.cells[slot].value.push(character);
        }
        cells
    }

    /// Concatenates the cells and trims the result.
    #[must_use]
    pub fn code(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.value.as_str())
            .collect::<String>()
            .trim()
            .to_string()
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
            cell.focused = false;
        }
    }

    pub fn focus_first(&mut self) {
        for (index, cell) in self.cells.iter_mut().enumerate() {
            cell.focused = index == 0;
        }
    }
}

/// Fields of the sign-up form, in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Password,
    Name,
    Captcha,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Email, Self::Password, Self::Name, Self::Captcha];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::Name => "name",
            Self::Captcha => "captcha",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SignUpPage {
    pub email: Input,
    pub password: Input,
    pub name: Input,
    pub errors: FieldErrors,
    pub server_error: Label,
    pub submit: Button,
    /// Field that received focus after a failed validation. `Captcha` has no input of
    /// its own, so focus is tracked here rather than on the inputs.
    pub focused: Option<Field>,
}

impl SignUpPage {
    #[must_use]
    pub fn new(email: &str, password: &str, name: &str) -> Self {
        Self {
            email: Input::with_value(email),
            password: Input::with_value(password),
            name: Input::with_value(name),
            ..Self::default()
        }
    }

    pub fn focus(&mut self, field: Field) {
        self.email.focused = field == Field::Email;
        self.password.focused = field == Field::Password;
        self.name.focused = field == Field::Name;
        self.focused = Some(field);
    }

    pub fn reset(&mut self) {
        self.email.clear();
        self.password.clear();
        self.name.clear();
    }
}

#[derive(Clone, Debug)]
pub struct PhonePage {
    pub phone_form_visible: bool,
    pub code_form_visible: bool,
    pub phone: Input,
    pub phone_error: Label,
    pub code: CodeCells,
    pub code_error: Label,
    pub success: Label,
    pub resend: Button,
    pub resend_error: Label,
    /// Blocking notice shown before a forced redirect.
    pub alert: Option<String>,
}

impl Default for PhonePage {
    fn default() -> Self {
        Self {
            phone_form_visible: true,
            code_form_visible: false,
            phone: Input::default(),
            phone_error: Label::default(),
            code: CodeCells::default(),
            code_error: Label::default(),
            success: Label::default(),
            resend: Button::default(),
            resend_error: Label::default(),
            alert: None,
        }
    }
}

impl PhonePage {
    #[must_use]
    pub fn with_phone(phone: &str) -> Self {
        Self {
            phone: Input::with_value(phone),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_code(code: &str) -> Self {
        Self {
            phone_form_visible: false,
            code_form_visible: true,
            code: CodeCells::from_code(code),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SignInPage {
    pub email: Input,
    pub password: Input,
    pub error: Label,
}

impl SignInPage {
    #[must_use]
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: Input::with_value(email),
            password: Input::with_value(password),
            error: Label::default(),
        }
    }
}
