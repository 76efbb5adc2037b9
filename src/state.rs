use std::sync::Arc;

const DEFAULT_LOCALE: &str = "en-US";

/// Evaluation context threaded through the values an evaluation produces.
///
/// Values only carry the handle along; nothing in this crate reads or
/// changes it. Cloning is cheap and every clone refers to the same context.
#[derive(Debug, Clone)]
pub struct State(Arc<InnerState>);

/// The actual state data
#[derive(Debug)]
struct InnerState {
    locale: String,
    label: Option<String>,
}

impl State {
    pub fn builder() -> StateBuilder {
        StateBuilder::default()
    }

    pub fn locale(&self) -> &str {
        &self.0.locale
    }

    pub fn label(&self) -> Option<&str> {
        self.0.label.as_deref()
    }

    /// True if both handles point at the same context
    pub fn same(&self, other: &State) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for State {
    fn default() -> Self {
        State::builder().build()
    }
}

/// Builder for [`State`], e.g.
/// `State::builder().locale("de-DE").label("policy-eval").build()`
#[derive(Debug, Clone)]
pub struct StateBuilder {
    locale: String,
    label: Option<String>,
}

impl Default for StateBuilder {
    fn default() -> Self {
        StateBuilder {
            locale: DEFAULT_LOCALE.to_string(),
            label: None,
        }
    }
}

impl StateBuilder {
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn build(self) -> State {
        State(Arc::new(InnerState {
            locale: self.locale,
            label: self.label,
        }))
    }
}
