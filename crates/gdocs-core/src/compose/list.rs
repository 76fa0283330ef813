use serde_json::json;
use tracing::debug;

use super::{validate_position, validate_range, Composer, EditContext, ResultMap};
use crate::batch::BatchBuilder;
use crate::error::{DocsError, Result};
use crate::operation::{Range, Reply, Request};

pub const DEFAULT_BULLET_PRESET: &str = "BULLET_DISC_CIRCLE_SQUARE";
pub const NUMBERED_BULLET_PRESET: &str = "NUMBERED_DECIMAL_ALPHA_ROMAN";

/// Insert items as new paragraphs and turn them into a list.
#[derive(Debug, Clone)]
pub struct AddList {
    /// Semicolon-separated items.
    pub items: String,
    pub at: i64,
    pub numbered: bool,
    /// Overrides the preset picked by `numbered`.
    pub preset: Option<String>,
}

impl AddList {
    fn lines(&self) -> Vec<&str> {
        self.items
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect()
    }

    /// Every item followed by a newline, so each one becomes its own paragraph.
    pub fn inserted_text(&self) -> String {
        self.lines()
            .iter()
            .map(|line| format!("{}\n", line))
            .collect()
    }

    fn preset(&self) -> String {
        match &self.preset {
            Some(preset) => preset.to_uppercase(),
            None if self.numbered => NUMBERED_BULLET_PRESET.to_string(),
            None => DEFAULT_BULLET_PRESET.to_string(),
        }
    }
}

impl Composer for AddList {
    fn intent(&self) -> &'static str {
        "add list"
    }

    fn validate(&self) -> Result<()> {
        validate_position("at", self.at)?;
        if self.lines().is_empty() {
            return Err(DocsError::Validation("--items must contain at least one item".into()));
        }
        if let Some(preset) = &self.preset {
            if preset.trim().is_empty() {
                return Err(DocsError::Validation("--preset must not be empty".into()));
            }
        }
        Ok(())
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        // The bullet range only exists once the insert ahead of it in the
        // same batch has been applied.
        let mut batch = BatchBuilder::new();
        let range = batch.insert_text(self.at, &self.inserted_text(), ctx.tab_id);
        debug!(
            "Bulleting {} inserted units from {}",
            batch.inserted_len(),
            self.at
        );
        batch.push(Request::CreateParagraphBullets {
            range,
            bullet_preset: self.preset(),
        });
        Ok(batch.build())
    }

    fn report(&self, _replies: &[Reply], out: &mut ResultMap) {
        out.insert("items".into(), json!(self.lines().len()));
    }
}

/// Strip list bullets from the paragraphs overlapping `[from, to)`.
#[derive(Debug, Clone)]
pub struct RemoveList {
    pub from: i64,
    pub to: i64,
}

impl Composer for RemoveList {
    fn intent(&self) -> &'static str {
        "remove list formatting"
    }

    fn validate(&self) -> Result<()> {
        validate_range(self.from, self.to)
    }

    fn compose(&self, ctx: &EditContext<'_>) -> Result<Vec<Request>> {
        Ok(vec![Request::DeleteParagraphBullets {
            range: Range::new(self.from, self.to, ctx.tab_id),
        }])
    }
}
