//! Model configuration: value parsing and caching policy.

use gridbind_engine::engine::Value;

/// Parses raw host text into a cell value. Pure; composable by sequential
/// chaining with [`ValueParser::then`].
pub struct ValueParser {
    run: Box<dyn Fn(&str) -> Value>,
}

impl ValueParser {
    pub fn new(run: impl Fn(&str) -> Value + 'static) -> ValueParser {
        ValueParser { run: Box::new(run) }
    }

    pub fn parse(&self, raw: &str) -> Value {
        (self.run)(raw)
    }

    /// Chain a normalization step after this parser (outer ∘ inner).
    pub fn then(self, outer: impl Fn(Value) -> Value + 'static) -> ValueParser {
        let inner = self.run;
        ValueParser {
            run: Box::new(move |raw| outer(inner(raw))),
        }
    }
}

impl Default for ValueParser {
    /// Full-string float parses become numbers, everything else stays text.
    fn default() -> ValueParser {
        ValueParser::new(|raw| match raw.trim().parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Text(raw.to_string()),
        })
    }
}

/// Recognized model options.
pub struct ModelOptions {
    /// Keep resolved values in a sparse cache instead of re-reading the
    /// host on every dependency lookup. Disable for hosts whose state
    /// changes behind the model's back.
    pub caching_enabled: bool,
    pub value_parser: ValueParser,
    /// Advisory to the host: forward per-keystroke edits rather than only
    /// committed ones. Not consumed by the core itself.
    pub recalculate_on_keystroke: bool,
}

impl Default for ModelOptions {
    fn default() -> ModelOptions {
        ModelOptions {
            caching_enabled: true,
            value_parser: ValueParser::default(),
            recalculate_on_keystroke: false,
        }
    }
}
