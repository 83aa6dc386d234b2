//! Keyword-block input text.
//!
//! Block-structured simulation inputs nest `&SECTION ... &END` blocks holding
//! `KEYWORD  value` lines. A settings branch maps onto them directly:
//!
//! - a node becomes a block, its keys upper-cased;
//! - a `_h` key inside a node is the block header (`&SECTION header`), not a keyword;
//! - a list repeats its keyword once per element;
//! - `true` and the empty string produce a bare keyword.
//!
//! A few keys are reserved for preprocessor directives and repeated sections: `KIND`,
//! `AT_SET`, `AT_IF` and `AT_INCLUDE` (see [`render_block_input`]).

use crate::core::error::{Result, SettingsError};
use crate::core::key::Key;
use crate::core::settings::Settings;
use crate::core::value::Value;
use tracing::debug;

/// Key whose value becomes the header of the enclosing block.
pub const HEADER_KEY: &str = "_h";

const INDENT: &str = "  ";

/// Renders every entry of `input` as a top-level block, each followed by a blank line.
///
/// Reserved keys:
///
/// - `KIND`: every child `name` becomes its own `&KIND  NAME` block.
/// - `AT_SET`: its first entry `var = value` becomes `@SET var value`.
/// - `AT_IF`: its first entry `predicate = { ... }` becomes an `@IF predicate` ... `@ENDIF` group.
/// - `AT_INCLUDE`: a scalar value becomes `@include value`.
///
/// # Errors
///
/// Returns [`SettingsError::TypeMismatch`] when a reserved key holds the wrong kind of
/// value, and [`SettingsError::KeyResolution`] when `AT_SET` or `AT_IF` is empty.
pub fn render_block_input(input: &Settings) -> Result<String> {
    debug!("Rendering block input with {} top-level entries", input.len());
    let mut out = String::new();
    for (key, value) in input {
        write_entry(&mut out, &key.to_string(), value, "")?;
        out.push('\n');
    }
    Ok(out)
}

fn write_entry(out: &mut String, key: &str, value: &Value, indent: &str) -> Result<()> {
    let key = key.to_uppercase();
    match (key.as_str(), value) {
        ("KIND", Value::Node(kinds)) => write_kinds(out, kinds, indent),
        ("AT_SET", Value::Node(node)) => write_set(out, node),
        ("AT_IF", Value::Node(node)) => write_if(out, node, indent),
        ("AT_INCLUDE", Value::Node(_)) => Err(SettingsError::TypeMismatch {
            key: key.clone(),
            expected: "scalar",
            found: "node",
        }),
        (_, Value::Node(node)) => write_section(out, &key, node, indent),
        ("AT_INCLUDE", other) => {
            out.push_str(&format!("@include {}\n", other));
            Ok(())
        }
        (_, Value::List(items)) => {
            for item in items.borrow().iter() {
                write_entry(out, &key, item, indent)?;
            }
            Ok(())
        }
        (_, Value::Bool(true)) => {
            out.push_str(&format!("{}{}\n", indent, key));
            Ok(())
        }
        (_, Value::Str(s)) if s.is_empty() => {
            out.push_str(&format!("{}{}\n", indent, key));
            Ok(())
        }
        (_, other) => {
            out.push_str(&format!("{}{}  {}\n", indent, key, other));
            Ok(())
        }
    }
}

fn write_section(out: &mut String, key: &str, node: &Settings, indent: &str) -> Result<()> {
    match node.get(HEADER_KEY) {
        Some(header) => out.push_str(&format!("{}&{} {}\n", indent, key, header)),
        None => out.push_str(&format!("{}&{}\n", indent, key)),
    }
    let inner = format!("{}{}", indent, INDENT);
    for (child, value) in node {
        if child.as_str() == Some(HEADER_KEY) {
            continue;
        }
        write_entry(out, &child.to_string(), value, &inner)?;
    }
    out.push_str(&format!("{}&END\n", indent));
    Ok(())
}

fn write_kinds(out: &mut String, kinds: &Settings, indent: &str) -> Result<()> {
    let inner = format!("{}{}", indent, INDENT);
    for (name, value) in kinds {
        let kind = expect_node(name, value)?;
        out.push_str(&format!("{}&KIND  {}\n", indent, name.to_string().to_uppercase()));
        for (child, child_value) in kind {
            write_entry(out, &child.to_string(), child_value, &inner)?;
        }
        out.push_str(&format!("{}&END\n", indent));
    }
    Ok(())
}

fn write_set(out: &mut String, node: &Settings) -> Result<()> {
    let (var, value) = first_entry(node, "AT_SET")?;
    out.push_str(&format!("@SET {} {}\n", var, value));
    Ok(())
}

fn write_if(out: &mut String, node: &Settings, indent: &str) -> Result<()> {
    let (predicate, value) = first_entry(node, "AT_IF")?;
    let branch = expect_node(predicate, value)?;
    out.push_str(&format!("{}@IF {}\n", indent, predicate));
    let inner = format!("{}{}", indent, INDENT);
    for (child, child_value) in branch {
        write_entry(out, &child.to_string(), child_value, &inner)?;
    }
    out.push_str(&format!("{}@ENDIF\n", indent));
    Ok(())
}

fn first_entry<'a>(node: &'a Settings, directive: &str) -> Result<(&'a Key, &'a Value)> {
    node.iter()
        .next()
        .ok_or_else(|| SettingsError::KeyResolution {
            key: directive.to_string(),
            reason: "directive block is empty",
        })
}

fn expect_node<'a>(key: &Key, value: &'a Value) -> Result<&'a Settings> {
    value
        .as_node()
        .ok_or_else(|| SettingsError::not_a_node(key, value.type_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::List;

    #[test]
    fn plain_section_renders_keywords() {
        let mut input = Settings::new();
        input.set_path("global.project", "h2o").unwrap();
        input.set_path("global.run_type", "energy").unwrap();

        assert_eq!(
            render_block_input(&input).unwrap(),
            "&GLOBAL\n  PROJECT  h2o\n  RUN_TYPE  energy\n&END\n\n"
        );
    }

    #[test]
    fn headers_flags_and_kinds_render_in_key_order() {
        let mut input = Settings::new();
        input.set_path("force_eval._h", "main").unwrap();
        input.set_path("force_eval.method", "quickstep").unwrap();
        input.set_path("force_eval.dft.uks", true).unwrap();
        input.set_path("force_eval.dft.restricted", "").unwrap();
        input.set_path("force_eval.dft.multiplicity", 1).unwrap();
        input
            .set_path("force_eval.subsys.kind.O.basis_set", "TZVP")
            .unwrap();
        input
            .set_path("force_eval.subsys.kind.O.potential", "GTH")
            .unwrap();
        input
            .set_path("force_eval.subsys.kind.H.basis_set", "DZVP")
            .unwrap();

        let expected = "\
&FORCE_EVAL main
  &DFT
    MULTIPLICITY  1
    RESTRICTED
    UKS
  &END
  METHOD  quickstep
  &SUBSYS
    &KIND  H
      BASIS_SET  DZVP
    &END
    &KIND  O
      BASIS_SET  TZVP
      POTENTIAL  GTH
    &END
  &END
&END

";
        assert_eq!(render_block_input(&input).unwrap(), expected);
    }

    #[test]
    fn directives_and_lists_render() {
        let mut input = Settings::new();
        input.set_path("at_set.NREP", 2).unwrap();
        input.set("at_include", "common.inc");
        input.set_path("motion.at_if.$NREP.max_iter", 10).unwrap();
        input
            .set_path("motion.list", List::from(vec![Value::from(1), Value::from(2)]))
            .unwrap();

        let expected = "\
@include common.inc

@SET NREP 2

&MOTION
  @IF $NREP
    MAX_ITER  10
  @ENDIF
  LIST  1
  LIST  2
&END

";
        assert_eq!(render_block_input(&input).unwrap(), expected);
    }

    #[test]
    fn nested_sections_indent_every_line() {
        let mut input = Settings::new();
        input.set_path("motion.md._h", "nvt").unwrap();
        input.set_path("motion.md.steps", 10).unwrap();
        input.set_path("motion.md.thermostat.type", "csvr").unwrap();

        assert_eq!(
            render_block_input(&input).unwrap(),
            "&MOTION\n  &MD nvt\n    STEPS  10\n    &THERMOSTAT\n      TYPE  csvr\n    &END\n  &END\n&END\n\n"
        );
    }

    #[test]
    fn false_values_are_written_out() {
        let mut input = Settings::new();
        input.set_path("dft.uks", false).unwrap();
        assert_eq!(
            render_block_input(&input).unwrap(),
            "&DFT\n  UKS  false\n&END\n\n"
        );
    }

    #[test]
    fn kind_entries_must_be_nodes() {
        let mut input = Settings::new();
        input.set_path("subsys.kind.O", "TZVP").unwrap();
        assert_eq!(
            render_block_input(&input).unwrap_err(),
            SettingsError::TypeMismatch {
                key: "O".to_string(),
                expected: "node",
                found: "string"
            }
        );
    }

    #[test]
    fn empty_directive_blocks_are_rejected() {
        let mut input = Settings::new();
        input.set("at_set", Settings::new());
        assert!(matches!(
            render_block_input(&input),
            Err(SettingsError::KeyResolution { .. })
        ));
    }

    #[test]
    fn include_requires_a_scalar() {
        let mut input = Settings::new();
        input.set_path("at_include.file", "x").unwrap();
        assert!(matches!(
            render_block_input(&input),
            Err(SettingsError::TypeMismatch { .. })
        ));
    }
}
