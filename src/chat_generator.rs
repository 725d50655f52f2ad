use std::io::{self, Write};

use crate::config_types::{
    AlignX, AlignY, Alignment, AllowListed, Rating, RatingType, Variable, Widget,
};
use crate::config_value::VariableValue;
use crate::error::{ChatError, ChatResult};
use crate::escape::escape;
use crate::validator::check;

const SCRIPT_OPEN: &str = "<script type=\"text/javascript\">
            var _smartsupp = _smartsupp || {};
            _smartsupp.key = '";

/// Loader that pulls in the widget runtime. Emitted unchanged on every render.
const BOOTSTRAP: &str = "window.smartsupp||(function(d) {
                var s,c,o=smartsupp=function(){ o._.push(arguments)};o._=[];
                s=d.getElementsByTagName('script')[0];c=d.createElement('script');
                c.type='text/javascript';c.charset='utf-8';c.async=true;
                c.src='//www.smartsuppchat.com/loader.js';s.parentNode.insertBefore(c,s);
            })(document);";

const SCRIPT_CLOSE: &str = "\n            </script>";

pub const DEFAULT_CHARSET: &str = "utf-8";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Builds the script snippet that boots the Smartsupp chat on a page.
///
/// Options are collected through setters; [`ChatGenerator::render`] turns
/// them into the final `<script>` block. Every caller-supplied string is
/// passed through [`escape`] before it is embedded.
///
/// ```
/// use smartsupp_snippet::ChatGenerator;
///
/// let mut chat = ChatGenerator::new();
/// chat.set_key("XYZ123456").set_name("Johny Depp");
/// chat.set_widget("button")?;
/// let snippet = chat.render()?;
/// assert!(snippet.contains("_smartsupp.widget = 'button';"));
/// # Ok::<(), smartsupp_snippet::ChatError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ChatGenerator {
    key: Option<String>,
    widget: Option<Widget>,
    alignment: Option<Alignment>,
    hide_widget: bool,
    name: Option<String>,
    email: Option<String>,
    variables: Vec<Variable>,
    rating: Rating,
    send_email_transcript: bool,
    cookie_domain: Option<String>,
    ga_key: Option<String>,
    /// Kept in the order the caller supplied them.
    ga_options: Option<Vec<(String, String)>>,
    charset: String,
    language: String,
}

impl Default for ChatGenerator {
    fn default() -> Self {
        Self {
            key: None,
            widget: None,
            alignment: None,
            hide_widget: false,
            name: None,
            email: None,
            variables: Vec::new(),
            rating: Rating::default(),
            send_email_transcript: true,
            cookie_domain: None,
            ga_key: None,
            ga_options: None,
            charset: DEFAULT_CHARSET.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl ChatGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with the account key already set.
    pub fn with_key(key: impl Into<String>) -> Self {
        let mut chat = Self::default();
        chat.set_key(key);
        chat
    }

    // --- setters ---

    pub fn set_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.key = Some(key.into());
        self
    }

    pub fn set_cookie_domain(&mut self, domain: impl Into<String>) -> &mut Self {
        self.cookie_domain = Some(domain.into());
        self
    }

    pub fn set_charset(&mut self, charset: impl Into<String>) -> &mut Self {
        self.charset = charset.into();
        self
    }

    pub fn set_language(&mut self, language: impl Into<String>) -> &mut Self {
        self.language = language.into();
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> &mut Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the widget kind from its name (`button` or `widget`).
    pub fn set_widget(&mut self, kind: &str) -> ChatResult<&mut Self> {
        let kind = check::<Widget>(kind)?;
        Ok(self.set_widget_kind(kind))
    }

    pub fn set_widget_kind(&mut self, kind: Widget) -> &mut Self {
        tracing::debug!(target: "smartsupp", widget = %kind, "widget kind set");
        self.widget = Some(kind);
        self
    }

    /// Places the chat box. Both alignment names are checked before any
    /// field is touched, so a rejected call leaves the placement as it was.
    pub fn set_align(
        &mut self,
        align_x: &str,
        align_y: &str,
        offset_x: i32,
        offset_y: i32,
    ) -> ChatResult<&mut Self> {
        let align_x = check::<AlignX>(align_x)?;
        let align_y = check::<AlignY>(align_y)?;
        Ok(self.set_align_typed(align_x, align_y, offset_x, offset_y))
    }

    pub fn set_align_typed(
        &mut self,
        align_x: AlignX,
        align_y: AlignY,
        offset_x: i32,
        offset_y: i32,
    ) -> &mut Self {
        tracing::debug!(
            target: "smartsupp",
            align_x = %align_x,
            align_y = %align_y,
            offset_x,
            offset_y,
            "chat box alignment set"
        );
        self.alignment = Some(Alignment {
            align_x,
            align_y,
            offset_x: offset_x.to_string(),
            offset_y: offset_y.to_string(),
        });
        self
    }

    /// Appends a visitor variable. Earlier variables, including ones with
    /// the same id, are kept.
    pub fn set_variable(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<VariableValue>,
    ) -> &mut Self {
        self.variables.push(Variable {
            id: id.into(),
            label: label.into(),
            value: value.into(),
        });
        tracing::debug!(target: "smartsupp", count = self.variables.len(), "variable added");
        self
    }

    /// Turns on conversation rating. `rating_type` is `advanced` or `simple`.
    pub fn enable_rating(&mut self, rating_type: &str, comment: bool) -> ChatResult<&mut Self> {
        let rating_type = check::<RatingType>(rating_type)?;
        Ok(self.enable_rating_typed(rating_type, comment))
    }

    pub fn enable_rating_typed(&mut self, rating_type: RatingType, comment: bool) -> &mut Self {
        tracing::debug!(target: "smartsupp", rating_type = %rating_type, comment, "rating enabled");
        self.rating = Rating {
            enabled: true,
            rating_type,
            comment,
        };
        self
    }

    /// Simple rating without the comment box.
    pub fn enable_default_rating(&mut self) -> &mut Self {
        self.enable_rating_typed(RatingType::default(), false)
    }

    pub fn hide_widget(&mut self) -> &mut Self {
        self.hide_widget = true;
        self
    }

    pub fn disable_send_email_transcript(&mut self) -> &mut Self {
        self.send_email_transcript = false;
        self
    }

    pub fn set_google_analytics<I, K, V>(&mut self, key: impl Into<String>, options: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.ga_key = Some(key.into());
        self.ga_options = Some(
            options
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    // --- accessors ---

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Widget kind, `widget` unless [`ChatGenerator::set_widget`] was called.
    pub fn widget(&self) -> Widget {
        self.widget.unwrap_or_default()
    }

    pub fn alignment(&self) -> Option<&Alignment> {
        self.alignment.as_ref()
    }

    pub fn is_widget_hidden(&self) -> bool {
        self.hide_widget
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn send_email_transcript(&self) -> bool {
        self.send_email_transcript
    }

    pub fn cookie_domain(&self) -> Option<&str> {
        self.cookie_domain.as_deref()
    }

    pub fn ga_key(&self) -> Option<&str> {
        self.ga_key.as_deref()
    }

    pub fn ga_options(&self) -> Option<&[(String, String)]> {
        self.ga_options.as_deref()
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    // --- rendering ---

    /// Renders the snippet. Fails only when no key has been set.
    pub fn render(&self) -> ChatResult<String> {
        let key = self.key.as_deref().ok_or(ChatError::MissingKey)?;

        let options = self.option_lines();
        let calls = self.call_lines();

        let mut out = String::with_capacity(1024);
        out.push_str(SCRIPT_OPEN);
        out.push_str(&escape(key));
        out.push_str("';\n");
        out.push_str(&options.join("\n"));
        out.push('\n');
        out.push_str(BOOTSTRAP);
        out.push_str(&calls.join("\n"));
        out.push_str(SCRIPT_CLOSE);

        tracing::debug!(
            target: "smartsupp",
            options = options.len(),
            calls = calls.len(),
            bytes = out.len(),
            "chat snippet rendered"
        );
        Ok(out)
    }

    /// Renders the snippet into `writer`.
    pub fn render_to<W: Write>(&self, writer: &mut W) -> ChatResult<()> {
        let snippet = self.render()?;
        writer.write_all(snippet.as_bytes())?;
        Ok(())
    }

    /// With `output_directly` the snippet goes to stdout and `None` is
    /// returned; otherwise it is returned and nothing is written.
    pub fn render_output(&self, output_directly: bool) -> ChatResult<Option<String>> {
        let mut stdout = io::stdout().lock();
        self.render_output_to(output_directly, &mut stdout)
    }

    /// [`ChatGenerator::render_output`] with an explicit sink instead of stdout.
    pub fn render_output_to<W: Write>(
        &self,
        output_directly: bool,
        writer: &mut W,
    ) -> ChatResult<Option<String>> {
        if !output_directly {
            return self.render().map(Some);
        }

        self.render_to(writer)?;
        writer.flush()?;
        Ok(None)
    }

    /// `_smartsupp.*` assignments placed before the loader.
    fn option_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(domain) = &self.cookie_domain {
            lines.push(format!("_smartsupp.cookieDomain = '{}';", escape(domain)));
        }

        if !self.send_email_transcript {
            lines.push("_smartsupp.sendEmailTanscript = false;".to_string());
        }

        if self.rating.enabled {
            lines.push("_smartsupp.ratingEnabled = true;  // by default false".to_string());
            lines.push(format!(
                "_smartsupp.ratingType = '{}'; // by default 'simple'",
                self.rating.rating_type.as_str()
            ));
            lines.push(format!(
                "_smartsupp.ratingComment = {};  // default false",
                self.rating.comment
            ));
        }

        if let Some(alignment) = &self.alignment {
            lines.push(format!(
                "_smartsupp.alignX = '{}'; // or 'left'",
                alignment.align_x.as_str()
            ));
            lines.push(format!(
                "_smartsupp.alignY = '{}';  // by default 'bottom'",
                alignment.align_y.as_str()
            ));
        }

        if let Some(widget) = self.widget {
            lines.push(format!(
                "_smartsupp.widget = '{}'; // by default 'widget'",
                widget.as_str()
            ));
        }

        if let Some(alignment) = &self.alignment {
            lines.push(format!(
                "_smartsupp.offsetX = {};    // offset from left / right, default 10",
                alignment.offset_x
            ));
            lines.push(format!(
                "_smartsupp.offsetY = {};    // offset from top, default 100",
                alignment.offset_y
            ));
        }

        if let Some(ga_key) = &self.ga_key {
            lines.push(format!("_smartsupp.gaKey = '{}';", escape(ga_key)));
        }

        if let Some(options) = self.ga_options.as_ref().filter(|o| !o.is_empty()) {
            let entries = options
                .iter()
                .map(|(k, v)| format!("'{}': '{}'", escape(k), escape(v)))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("_smartsupp.gaOptions = {{{entries}}};"));
        }

        if self.hide_widget {
            lines.push("_smartsupp.hideWidget = true;".to_string());
        }

        lines
    }

    /// `smartsupp(...)` calls placed after the loader.
    fn call_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(email) = &self.email {
            lines.push(format!("smartsupp('email', '{}');", escape(email)));
        }

        if let Some(name) = &self.name {
            lines.push(format!("smartsupp('name', '{}');", escape(name)));
        }

        if !self.variables.is_empty() {
            let entries = self
                .variables
                .iter()
                .map(|v| {
                    format!(
                        "{}: {{label: '{}', value: '{}'}}",
                        object_key(&v.id),
                        escape(&v.label),
                        escape(&v.value.to_string())
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("smartsupp('variables', {{{entries}}});"));
        }

        lines
    }
}

/// Plain alphanumeric ids are written as bare keys; anything else is quoted
/// and escaped so it stays inside the object literal.
fn object_key(id: &str) -> String {
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric()) {
        id.to_string()
    } else {
        format!("'{}'", escape(id))
    }
}
