//! Signature transformer: strips the receiver and builds the forwarding call.
//!
//! | Declared          | Wrapper parameter | Forwarded as   |
//! |-------------------|-------------------|----------------|
//! | `a`, `a: T = 1`   | verbatim          | `a`            |
//! | `*rest`           | verbatim          | `*rest`        |
//! | `c=1` after `*`   | verbatim          | `c=c`          |
//! | `**kw`            | verbatim          | `**kw`         |
//! | `*`, `/`          | verbatim          | (omitted)      |
//!
//! Keyword-only parameters are forwarded by name so the wrapper's defaults
//! are the only defaults that apply; the original method never sees a
//! missing argument.

use crate::error::TransformError;
use crate::method::{MethodRecord, ParamKind};

/// The two halves of a generated function's signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Parameter list without parentheses, e.g. `x, *, y=2`.
    pub params: String,
    /// Forwarding call arguments without parentheses, e.g. `x, y=y`.
    pub call_args: String,
}

/// Build the wrapper signature for `method`.
///
/// Fails with [`TransformError::MissingReceiver`] when the first parameter is
/// absent or is not a plain positional parameter.
pub fn transform(method: &MethodRecord) -> Result<Signature, TransformError> {
    let rest = match method.params.split_first() {
        Some((receiver, rest)) if receiver.kind.is_positional() => rest,
        _ => {
            return Err(TransformError::MissingReceiver {
                method: method.name.clone(),
            })
        }
    };

    let mut params = Vec::with_capacity(rest.len());
    let mut positional_seen = false;
    for param in rest {
        match param.kind {
            ParamKind::PositionalSeparator if !positional_seen => continue,
            ParamKind::PositionalOnly | ParamKind::Positional => positional_seen = true,
            _ => {}
        }
        params.push(param.text.as_str());
    }

    let call_args: Vec<String> = rest
        .iter()
        .filter_map(|param| match param.kind {
            ParamKind::PositionalOnly | ParamKind::Positional => Some(param.name.clone()),
            ParamKind::VarPositional => Some(format!("*{}", param.name)),
            ParamKind::KeywordOnly => Some(format!("{0}={0}", param.name)),
            ParamKind::VarKeyword => Some(format!("**{}", param.name)),
            ParamKind::PositionalSeparator | ParamKind::KeywordSeparator => None,
        })
        .collect();

    Ok(Signature {
        params: params.join(", "),
        call_args: call_args.join(", "),
    })
}
