use std::fmt;

/// A user as reported by the messaging platform
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub real_name: Option<String>,
    pub is_bot: bool,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            real_name: None,
            is_bot: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_real_name(mut self, real_name: impl Into<String>) -> Self {
        self.real_name = Some(real_name.into());
        self
    }

    pub fn bot(mut self) -> Self {
        self.is_bot = true;
        self
    }

    pub fn display_name(&self) -> String {
        let non_empty = |s: &&String| !s.is_empty();
        if let Some(name) = self.name.as_ref().filter(non_empty) {
            name.clone()
        } else if let Some(real_name) = self.real_name.as_ref().filter(non_empty) {
            real_name.clone()
        } else {
            self.id.clone()
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
