//! Record generator.
//!
//! Reads a schema table (JSON) and emits one `record!` invocation per record,
//! with an optional constructor taking the record's required fields. This is
//! how the `gnap` module is produced from `schemas/gnap.json`.

use std::collections::{BTreeSet, HashSet};
use std::fmt::{self, Write};
use std::path::Path;

use heck::{ToShoutySnakeCase, ToSnakeCase};
use serde::Deserialize;
use tracing::debug;

use crate::error::{GenerateError, SchemaError};
use crate::schema::{check_shapes, FieldShape};
use crate::types::{GenerateOptions, TOKEN_TYPES};

/// Accessor names that cannot be emitted as method names.
const KEYWORDS: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try",
    "type", "unsafe", "use", "where", "while", "yield",
];

/// A schema table: the generator's input.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaTable {
    pub records: Vec<RecordDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordDef {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    /// Function in `super::rules` implementing the record's cross-field rule.
    #[serde(default)]
    pub rule: Option<String>,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDef {
    /// Accessor name in any case style.
    pub name: String,
    /// Wire name; derived from `name` when omitted.
    #[serde(default)]
    pub wire_name: Option<String>,
    /// `string`, `int`, `bool`, `key`, `token:<Name>` or `record:<Name>`,
    /// optionally prefixed by `[]`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub collapsible: bool,
    #[serde(default)]
    pub shorthand: bool,
}

/// One emitted source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub file_name: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Element {
    String,
    Int,
    Bool,
    Key,
    Token(String),
    Record(String),
}

#[derive(Debug, Clone)]
struct Field {
    accessor: String,
    wire_name: String,
    sequence: bool,
    element: Element,
    required: bool,
    collapsible: bool,
    shorthand: bool,
}

fn parse_type(kind: &str) -> Option<(bool, Element)> {
    let (sequence, element) = match kind.strip_prefix("[]") {
        Some(rest) => (true, rest),
        None => (false, kind),
    };
    let element = match element.split_once(':') {
        None => match element {
            "string" => Element::String,
            "int" => Element::Int,
            "bool" => Element::Bool,
            "key" => Element::Key,
            _ => return None,
        },
        Some(("token", name)) if !name.is_empty() => Element::Token(name.to_string()),
        Some(("record", name)) if !name.is_empty() => Element::Record(name.to_string()),
        Some(_) => return None,
    };
    Some((sequence, element))
}

fn rust_type(element: &Element) -> &str {
    match element {
        Element::String => "String",
        Element::Int => "i64",
        Element::Bool => "bool",
        Element::Key => "Jwk",
        Element::Token(name) | Element::Record(name) => name,
    }
}

/// Normalize and check one record definition.
fn normalize(def: &RecordDef, records: &HashSet<&str>) -> Result<Vec<Field>, SchemaError> {
    let mut fields = Vec::with_capacity(def.fields.len());

    for field in &def.fields {
        let accessor = field.name.to_snake_case();
        let (sequence, element) =
            parse_type(&field.kind).ok_or_else(|| SchemaError::UnknownType {
                record: def.name.clone(),
                field: field.name.clone(),
                kind: field.kind.clone(),
            })?;

        let unknown = |what, target: &str| SchemaError::UnknownReference {
            record: def.name.clone(),
            field: field.name.clone(),
            what,
            target: target.to_string(),
        };
        match &element {
            Element::Token(name) if !TOKEN_TYPES.contains(&name.as_str()) => {
                return Err(unknown("token type", name));
            }
            Element::Record(name) if !records.contains(name.as_str()) => {
                return Err(unknown("record", name));
            }
            _ => {}
        }

        if KEYWORDS.contains(&accessor.as_str()) {
            return Err(SchemaError::ReservedAccessor {
                record: def.name.clone(),
                field: field.name.clone(),
            });
        }

        fields.push(Field {
            wire_name: field.wire_name.clone().unwrap_or_else(|| accessor.clone()),
            accessor,
            sequence,
            element,
            required: field.required,
            collapsible: field.collapsible,
            shorthand: field.shorthand,
        });
    }

    let shapes: Vec<FieldShape<'_>> = fields
        .iter()
        .map(|f| FieldShape {
            wire_name: &f.wire_name,
            accessor: &f.accessor,
            sequence: f.sequence,
            string: f.element == Element::String,
            collapsible: f.collapsible,
            shorthand: f.shorthand,
        })
        .collect();
    check_shapes(&def.name, &shapes)?;

    // Source layout only; wire order is always by wire name.
    fields.sort_by(|a, b| a.accessor.cmp(&b.accessor));
    Ok(fields)
}

fn use_line(out: &mut impl Write, path: &str, names: &BTreeSet<&str>) -> fmt::Result {
    let list: Vec<&str> = names.iter().copied().collect();
    match list.as_slice() {
        [] => Ok(()),
        [one] => writeln!(out, "use {}::{};", path, one),
        _ => writeln!(out, "use {}::{{{}}};", path, list.join(", ")),
    }
}

fn render_record(def: &RecordDef, fields: &[Field], options: &GenerateOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    write_record(&mut out, def, fields, options).unwrap_or(());
    out
}

fn write_record(
    out: &mut impl Write,
    def: &RecordDef,
    fields: &[Field],
    options: &GenerateOptions,
) -> fmt::Result {
    writeln!(out, "{}\n", options.header)?;

    let mut tokens = BTreeSet::new();
    let mut values = BTreeSet::new();
    let mut records = BTreeSet::new();
    for field in fields {
        match &field.element {
            Element::Token(name) => {
                tokens.insert(name.as_str());
            }
            Element::Record(name) if *name != def.name => {
                records.insert(name.as_str());
            }
            Element::Key => {
                values.insert("Jwk");
            }
            _ => {}
        }
    }
    use_line(out, "crate::types", &tokens)?;
    use_line(out, "crate::value", &values)?;
    use_line(out, "super", &records)?;
    if !(tokens.is_empty() && values.is_empty() && records.is_empty()) {
        out.write_char('\n')?;
    }

    out.write_str("record! {\n")?;
    if let Some(comment) = &def.comment {
        for line in comment.lines() {
            writeln!(out, "    /// {}", line)?;
        }
    }
    write!(out, "    pub struct {}: {}", def.name, def.name.to_shouty_snake_case())?;
    if let Some(rule) = &def.rule {
        write!(out, ", rule = super::rules::{}", rule)?;
    }
    out.write_str(" {\n")?;
    for field in fields {
        let ty = rust_type(&field.element);
        if field.sequence {
            write!(out, "        {}: [{}]", field.accessor, ty)?;
        } else {
            write!(out, "        {}: {}", field.accessor, ty)?;
        }
        write!(out, " => {:?}", field.wire_name)?;

        let flags: Vec<&str> = [
            (field.required, "required"),
            (field.collapsible, "collapsible"),
            (field.shorthand, "shorthand"),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, flag)| *flag)
        .collect();
        if !flags.is_empty() {
            write!(out, " [{}]", flags.join(", "))?;
        }
        out.write_str(",\n")?;
    }
    out.write_str("    }\n}\n")?;

    let required: Vec<&Field> = fields.iter().filter(|f| f.required).collect();
    if options.constructors && !required.is_empty() {
        write_constructor(out, &def.name, &required)?;
    }
    Ok(())
}

fn write_constructor(out: &mut impl Write, name: &str, required: &[&Field]) -> fmt::Result {
    let params: Vec<String> = required
        .iter()
        .map(|f| {
            let ty = match f.element {
                Element::String => "impl Into<String>",
                _ => rust_type(&f.element),
            };
            format!("{}: {}", f.accessor, ty)
        })
        .collect();

    writeln!(out, "\nimpl {} {{", name)?;
    writeln!(
        out,
        "    /// Creates a new `{}` with its required fields set.",
        name
    )?;
    writeln!(out, "    pub fn new({}) -> Self {{", params.join(", "))?;
    out.write_str("        let mut record = Self::default();\n")?;
    for field in required {
        if field.sequence {
            writeln!(out, "        record.add_{0}([{0}]);", field.accessor)?;
        } else {
            writeln!(out, "        record.set_{0}({0});", field.accessor)?;
        }
    }
    out.write_str("        record\n    }\n}\n")
}

/// Generate one source file per record of the table.
///
/// # Errors
///
/// Returns the first [`SchemaError`] found; nothing is emitted in that case.
pub fn generate(
    table: &SchemaTable,
    options: &GenerateOptions,
) -> Result<Vec<GeneratedFile>, SchemaError> {
    let mut names = HashSet::new();
    for def in &table.records {
        if !names.insert(def.name.as_str()) {
            return Err(SchemaError::DuplicateRecord {
                record: def.name.clone(),
            });
        }
    }

    let mut normalized = Vec::with_capacity(table.records.len());
    for def in &table.records {
        normalized.push((def, normalize(def, &names)?));
    }

    Ok(normalized
        .into_iter()
        .map(|(def, fields)| {
            debug!(record = %def.name, fields = fields.len(), "generating record");
            GeneratedFile {
                file_name: format!("{}.rs", def.name.to_snake_case()),
                source: render_record(def, &fields, options),
            }
        })
        .collect())
}

/// Parse a schema table from a JSON string.
pub fn parse_table(content: &str) -> Result<SchemaTable, GenerateError> {
    serde_json::from_str(content).map_err(|source| GenerateError::InvalidTable { source })
}

/// Load a schema table from a file.
///
/// # Errors
///
/// Returns `GenerateError::FileNotFound` if the file doesn't exist,
/// or `GenerateError::InvalidTable` if it isn't a valid table.
pub fn load_table(path: &Path) -> Result<SchemaTable, GenerateError> {
    if !path.exists() {
        return Err(GenerateError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| GenerateError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    parse_table(&content)
}

/// Write generated files into a directory, creating it if needed.
pub fn write_files(dir: &Path, files: &[GeneratedFile]) -> Result<(), GenerateError> {
    std::fs::create_dir_all(dir).map_err(|source| GenerateError::WriteError {
        path: dir.to_path_buf(),
        source,
    })?;
    for file in files {
        let path = dir.join(&file.file_name);
        std::fs::write(&path, &file.source)
            .map_err(|source| GenerateError::WriteError { path, source })?;
    }
    Ok(())
}
