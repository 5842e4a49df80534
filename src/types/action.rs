/// Work for the web view produced by an `App` operation.
///
/// The UI layer executes these in order; tests inspect them directly.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserAction {
    /// Load a URL (external or `stark://`) into the web view.
    Load(String),
    /// Evaluate a script in the currently displayed page.
    Eval(String),
}
