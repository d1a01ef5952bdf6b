//! 笔记表单与搜索

use crate::{ApiError, ApiResult, Note, NoteCreate, NoteUpdate};

/// 笔记编辑表单的内容
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub source: String,
    pub source_url: String,
}

impl NoteDraft {
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            source: note.source.clone().unwrap_or_default(),
            source_url: note.source_url.clone().unwrap_or_default(),
        }
    }

    fn validate(&self) -> ApiResult<()> {
        if self.title.trim().is_empty() {
            return Err(ApiError::validation("Title is required"));
        }
        if self.content.trim().is_empty() {
            return Err(ApiError::validation("Content is required"));
        }
        Ok(())
    }

    pub fn to_create(&self) -> ApiResult<NoteCreate> {
        self.validate()?;
        Ok(NoteCreate {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            source: non_blank(&self.source),
            source_url: non_blank(&self.source_url),
        })
    }

    pub fn to_update(&self) -> ApiResult<NoteUpdate> {
        self.validate()?;
        Ok(NoteUpdate {
            title: Some(self.title.trim().to_string()),
            content: Some(self.content.clone()),
            source: non_blank(&self.source),
            source_url: non_blank(&self.source_url),
        })
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// 标题或内容包含搜索词（大小写不敏感）；空搜索词匹配全部
pub fn filter_notes<'a>(notes: &'a [Note], term: &str) -> Vec<&'a Note> {
    let term = term.trim().to_lowercase();
    notes
        .iter()
        .filter(|n| {
            term.is_empty()
                || n.title.to_lowercase().contains(&term)
                || n.content.to_lowercase().contains(&term)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, title: &str, content: &str) -> Note {
        Note {
            id,
            user_id: 1,
            title: title.into(),
            content: content.into(),
            source: None,
            source_url: None,
        }
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let notes = vec![
            note(1, "Borrow checker", "lifetimes"),
            note(2, "Async", "Futures and PINNING"),
            note(3, "Macros", "declarative"),
        ];

        let ids = |term: &str| filter_notes(&notes, term).iter().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(ids(""), vec![1, 2, 3]);
        assert_eq!(ids("pinning"), vec![2]);
        assert_eq!(ids("BORROW"), vec![1]);
        assert!(ids("unsafe").is_empty());
    }

    #[test]
    fn test_draft_requires_title_and_content() {
        let draft = NoteDraft {
            title: " ".into(),
            content: "x".into(),
            ..Default::default()
        };
        assert_eq!(
            draft.to_create(),
            Err(ApiError::Validation("Title is required".into()))
        );

        let draft = NoteDraft {
            title: "t".into(),
            ..Default::default()
        };
        assert!(draft.to_update().is_err());
    }

    #[test]
    fn test_blank_source_fields_are_dropped() {
        let draft = NoteDraft {
            title: " Ownership ".into(),
            content: "moves".into(),
            source: "  ".into(),
            source_url: "https://doc.rust-lang.org/book".into(),
        };

        let create = draft.to_create().unwrap();
        assert_eq!(create.title, "Ownership");
        assert_eq!(create.source, None);
        assert_eq!(
            create.source_url.as_deref(),
            Some("https://doc.rust-lang.org/book")
        );
    }

    #[test]
    fn test_draft_round_trips_existing_note() {
        let mut n = note(4, "Traits", "dyn vs impl");
        n.source = Some("Book".into());
        let draft = NoteDraft::from_note(&n);
        assert_eq!(draft.source, "Book");
        assert!(draft.source_url.is_empty());
    }
}
