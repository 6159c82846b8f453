use crate::config::UseFor;

/// Where the host is calling from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSite {
    Chat,
    /// Notebook and default (non-chat) generation modes.
    Generic,
}

impl UseFor {
    /// Whether the pipeline runs at all for this call site.
    pub fn runs_for(self, site: CallSite) -> bool {
        match (self, site) {
            (Self::Both, _)
            | (Self::Chats, CallSite::Chat)
            | (Self::NotebookAndDefault, CallSite::Generic) => true,
            (Self::Chats, CallSite::Generic)
            | (Self::NotebookAndDefault, CallSite::Chat)
            | (Self::Disabled, _) => false,
        }
    }
}
