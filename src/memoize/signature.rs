//! Signature Module
//!
//! Introspectable description of a callable's declared parameter list.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MemoError, Result};

// == Parameter Kind ==
/// How a declared parameter binds call arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// A single positional argument, optionally defaulted
    #[default]
    Positional,
    /// Collects any remaining positional arguments (`*args`)
    Variadic,
    /// Collects any remaining keyword arguments (`**kwargs`)
    KeywordVariadic,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParamKind::Positional => "positional",
            ParamKind::Variadic => "variadic",
            ParamKind::KeywordVariadic => "keyword-variadic",
        })
    }
}

// == Parameter ==
/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name as written in the declaration
    pub name: String,
    /// Binding kind
    #[serde(default)]
    pub kind: ParamKind,
    /// Source text of the default value, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Param {
    /// A positional parameter with an optional default.
    pub fn positional(name: impl Into<String>, default: Option<&str>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Positional,
            default: default.map(str::to_owned),
        }
    }

    /// A `*name` parameter.
    pub fn variadic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Variadic,
            default: None,
        }
    }

    /// A `**name` parameter.
    pub fn keyword_variadic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::KeywordVariadic,
            default: None,
        }
    }

    /// Returns true for a single positional parameter.
    pub fn is_positional(&self) -> bool {
        self.kind == ParamKind::Positional
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.default) {
            (ParamKind::Positional, Some(default)) => write!(f, "{}={}", self.name, default),
            (ParamKind::Positional, None) => f.write_str(&self.name),
            (ParamKind::Variadic, _) => write!(f, "*{}", self.name),
            (ParamKind::KeywordVariadic, _) => write!(f, "**{}", self.name),
        }
    }
}

// == Signature ==
/// A callable's name and ordered parameter list.
///
/// Rendered with [`Display`](fmt::Display) the way the declaration reads,
/// e.g. `(x, y, z=5, *args, **kwargs)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Callable name
    pub name: String,
    /// Declared parameters in order
    #[serde(default)]
    pub params: Vec<Param>,
}

impl Signature {
    // == Constructor ==
    /// Creates a signature with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    // == Builders ==
    /// Appends `param`.
    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Appends a required positional parameter.
    pub fn param(self, name: impl Into<String>) -> Self {
        self.with_param(Param::positional(name, None))
    }

    /// Appends a positional parameter defaulting to `default` (source text).
    pub fn param_with_default(self, name: impl Into<String>, default: &str) -> Self {
        self.with_param(Param::positional(name, Some(default)))
    }

    /// Appends a `*name` parameter.
    pub fn variadic(self, name: impl Into<String>) -> Self {
        self.with_param(Param::variadic(name))
    }

    /// Appends a `**name` parameter.
    pub fn keyword_variadic(self, name: impl Into<String>) -> Self {
        self.with_param(Param::keyword_variadic(name))
    }

    // == Views ==
    /// Declared parameters, in order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Names of all parameters, in declaration order.
    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }

    /// Number of positional parameters, defaulted or not.
    pub fn positional_count(&self) -> usize {
        self.params.iter().filter(|p| p.is_positional()).count()
    }

    /// Number of positional parameters without a default.
    pub fn required_count(&self) -> usize {
        self.params
            .iter()
            .filter(|p| p.is_positional() && p.default.is_none())
            .count()
    }

    /// `(name, default)` pairs for every defaulted parameter.
    pub fn defaults(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .filter_map(|p| p.default.as_deref().map(|d| (p.name.as_str(), d)))
            .collect()
    }

    /// Returns true when the key can be formed from positional values alone.
    pub fn is_specializable(&self) -> bool {
        self.params.iter().all(Param::is_positional)
    }

    // == Validate ==
    /// Checks that the parameter list could be declared as written.
    ///
    /// Rejects empty or duplicate names, a required parameter following a
    /// defaulted one, and variadic markers that are repeated or out of
    /// order.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut seen_default = false;
        let mut last_kind = ParamKind::Positional;

        for param in &self.params {
            if param.name.is_empty() {
                return Err(self.invalid("empty parameter name"));
            }
            if !seen.insert(param.name.as_str()) {
                return Err(self.invalid(format!("duplicate parameter `{}`", param.name)));
            }

            match param.kind {
                ParamKind::Positional if last_kind != ParamKind::Positional => {
                    return Err(self.invalid(format!(
                        "positional parameter `{}` follows a variadic parameter",
                        param.name
                    )));
                }
                ParamKind::Positional => {
                    if param.default.is_some() {
                        seen_default = true;
                    } else if seen_default {
                        return Err(self.invalid(format!(
                            "required parameter `{}` follows a defaulted parameter",
                            param.name
                        )));
                    }
                }
                ParamKind::Variadic if last_kind != ParamKind::Positional => {
                    return Err(self.invalid(format!("misplaced `*{}`", param.name)));
                }
                ParamKind::KeywordVariadic if last_kind == ParamKind::KeywordVariadic => {
                    return Err(self.invalid(format!("misplaced `**{}`", param.name)));
                }
                _ => {}
            }

            if param.default.is_some() && !param.is_positional() {
                return Err(self.invalid(format!("`{}` cannot have a default", param.name)));
            }
            last_kind = param.kind;
        }

        Ok(())
    }

    /// Fails with [`MemoError::SignatureUnsupported`] on the first
    /// non-positional parameter.
    pub fn check_specializable(&self) -> Result<()> {
        match self.params.iter().find(|p| !p.is_positional()) {
            Some(param) => Err(MemoError::SignatureUnsupported {
                function: self.name.clone(),
                parameter: param.name.clone(),
                kind: param.kind,
            }),
            None => Ok(()),
        }
    }

    // == JSON ==
    /// Parses and validates a signature from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let signature: Signature = serde_json::from_str(json)
            .map_err(|e| MemoError::InvalidSignature(format!("malformed signature JSON: {}", e)))?;
        signature.validate()?;
        Ok(signature)
    }

    /// Serializes the signature to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| MemoError::InvalidSignature(e.to_string()))
    }

    fn invalid(&self, reason: impl fmt::Display) -> MemoError {
        MemoError::InvalidSignature(format!("`{}`: {}", self.name, reason))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param)?;
        }
        f.write_str(")")
    }
}

// == Signature Macro ==
/// Builds a [`Signature`] from a written parameter list.
///
/// ```
/// let sig = better_memoize::signature!(area(width, height = 1.0));
/// assert_eq!(sig.to_string(), "(width, height=1.0)");
/// ```
#[macro_export]
macro_rules! signature {
    ($name:ident ( $($arg:ident $(= $default:expr)?),* $(,)? )) => {
        $crate::memoize::Signature::new(::std::stringify!($name))
            $(
                .with_param($crate::memoize::Param::positional(
                    ::std::stringify!($arg),
                    ::std::option::Option::<&str>::None
                        $(.or(::std::option::Option::Some(::std::stringify!($default))))?,
                ))
            )*
    };
}
