use crate::model::{Citation, CitationCollection};
use serde::{Deserialize, Serialize};

/// What activating a citation should do.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CitationAction {
    OpenModal {
        name: String,
        params: serde_json::Value,
    },
    OpenUrl {
        url: String,
    },
    Ignore,
}

/// External collaborators that carry out citation actions.
pub trait CitationSink {
    fn open_modal(&self, name: &str, params: serde_json::Value);
    fn open_url(&self, url: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParamKey {
    ItemId,
    Id,
}

impl ParamKey {
    fn as_str(self) -> &'static str {
        match self {
            Self::ItemId => "itemId",
            Self::Id => "id",
        }
    }
}

pub fn citation_label(index: usize, citation: &Citation) -> String {
    format!("[{index}] {}", citation.title)
}

pub fn citation_action(citation: &Citation) -> CitationAction {
    let (name, key) = match &citation.collection {
        CitationCollection::Bill => ("billModal", ParamKey::ItemId),
        CitationCollection::Gazette => ("gazetteModal", ParamKey::Id),
        CitationCollection::CaseLaw => ("caseLawModal", ParamKey::Id),
        CitationCollection::Regulation => ("regulationModal", ParamKey::ItemId),
        CitationCollection::Consultation => ("consultationModal", ParamKey::ItemId),
        CitationCollection::Fine => ("fineModal", ParamKey::Id),
        CitationCollection::WebSearch => {
            return match citation.url.as_deref() {
                Some(url) if !url.trim().is_empty() => CitationAction::OpenUrl {
                    url: url.to_string(),
                },
                _ => CitationAction::Ignore,
            };
        }
        CitationCollection::Unknown(_) => return CitationAction::Ignore,
    };

    let mut params = serde_json::Map::new();
    params.insert(key.as_str().to_string(), serde_json::Value::String(citation.id.clone()));
    CitationAction::OpenModal {
        name: name.to_string(),
        params: serde_json::Value::Object(params),
    }
}

pub fn dispatch(action: &CitationAction, sink: &impl CitationSink) {
    match action {
        CitationAction::OpenModal { name, params } => {
            tracing::debug!(modal = %name, "opening citation modal");
            sink.open_modal(name, params.clone());
        }
        CitationAction::OpenUrl { url } => {
            tracing::debug!(%url, "opening citation link");
            sink.open_url(url);
        }
        CitationAction::Ignore => tracing::debug!("citation has no action"),
    }
}

/// Resolves and dispatches in one step; what a click handler calls.
pub fn activate(citation: &Citation, sink: &impl CitationSink) {
    let action = citation_action(citation);
    if action == CitationAction::Ignore {
        tracing::debug!(collection = citation.collection.as_str(), id = %citation.id, "ignoring citation");
        return;
    }
    dispatch(&action, sink);
}
