/// A display element the controller writes to. Handles are shared with the
/// page that renders them, so every method takes `&self`.
pub trait Surface {
    fn set_text(&self, text: &str);
    fn set_hidden(&self, hidden: bool);
    /// Toggles pointer interaction only. Logic guards never rely on it.
    fn set_interactive(&self, interactive: bool);
    /// Replaces the whole class list.
    fn set_class_name(&self, class_name: &str);
}

/// The five surfaces the controller is bound to.
#[derive(Debug, Clone)]
pub struct Surfaces<S> {
    pub draw_trigger: S,
    pub reset_trigger: S,
    pub result: S,
    pub level: S,
    pub message: S,
}
