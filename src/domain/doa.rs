use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doa {
    pub id: String,
    pub title: String,
    pub arabic: String,
    pub latin: String,
    pub translation: String,
}

impl Doa {
    pub fn share_text(&self) -> String {
        format!(
            "{}\n\n{}\n\n{}\n\n{}",
            self.title, self.arabic, self.latin, self.translation
        )
    }
}
