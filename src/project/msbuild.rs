//! MSBuild project file property scan

use crate::error::{RefswitchError, RefswitchResult};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;

const PROPERTY_GROUP: &[u8] = b"PropertyGroup";
const ASSEMBLY_NAME: &[u8] = b"AssemblyName";
const PROJECT_NAME_MACRO: &str = "$(MSBuildProjectName)";

/// Read the declared `AssemblyName` of a project file
pub async fn read_assembly_name(path: &Path) -> RefswitchResult<String> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| RefswitchError::io(format!("reading project {}", path.display()), e))?;

    let project_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    parse_assembly_name(&content, &project_name).map_err(|reason| {
        RefswitchError::MalformedProject {
            path: path.to_path_buf(),
            reason,
        }
    })
}

/// Extract `AssemblyName` from project XML
///
/// Only values directly inside a `PropertyGroup` count. When several groups
/// declare it, the last one in document order wins. Returns an empty string
/// when the property is never declared.
pub fn parse_assembly_name(content: &str, project_name: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut saw_root = false;
    let mut current: Option<String> = None;
    let mut assembly_name = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                saw_root = true;
                let name = e.local_name().as_ref().to_vec();
                if name == ASSEMBLY_NAME && in_property_group(&stack) {
                    current = Some(String::new());
                }
                stack.push(name);
            }
            Ok(Event::Empty(e)) => {
                saw_root = true;
                if e.local_name().as_ref() == ASSEMBLY_NAME && in_property_group(&stack) {
                    assembly_name.clear();
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(ref mut value) = current {
                    let text = t.unescape().map_err(|e| e.to_string())?;
                    value.push_str(&text);
                }
            }
            Ok(Event::CData(t)) => {
                if let Some(ref mut value) = current {
                    value.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == ASSEMBLY_NAME {
                    if let Some(value) = current.take() {
                        assembly_name = value.trim().replace(PROJECT_NAME_MACRO, project_name);
                    }
                }
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "XML parse error at position {}: {}",
                    reader.error_position(),
                    e
                ))
            }
            _ => {}
        }
    }

    if !saw_root {
        return Err("no root element".to_string());
    }
    if !stack.is_empty() {
        return Err("unexpected end of document".to_string());
    }

    Ok(assembly_name)
}

fn in_property_group(stack: &[Vec<u8>]) -> bool {
    stack.last().is_some_and(|parent| parent == PROPERTY_GROUP)
}
