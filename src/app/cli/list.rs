//! List command implementation.

use std::path::PathBuf;

use crate::domain::AppError;

pub fn run_list(
    group: Option<String>,
    detail: Option<String>,
    json: bool,
    catalog: Option<PathBuf>,
) -> Result<(), AppError> {
    let catalog = crate::app::api::load_catalog(catalog.as_deref())?;

    if let Some(id) = detail {
        let info = crate::app::api::list_detail(&catalog, &id)?;
        if json {
            println!("{}", to_json(&info)?);
            return Ok(());
        }

        println!("{} ({}): {}", info.name, info.id, info.description);
        println!("  Group: {}", info.group);
        if let Some(url) = &info.doc_url {
            println!("  Docs: {}", url);
        }
        if let Some(subdomain) = &info.subdomain {
            let host = if subdomain.is_empty() { "<domain>".to_string() } else { format!("{}.<domain>", subdomain) };
            println!("  Route: {}", host);
        }
        if let Some(port) = info.port {
            println!("  Port: {}", port);
        }
        if info.internal {
            println!("  Internal: selected only as a dependency");
        }
        if info.always_on {
            println!("  Always on");
        }
        if !info.dependencies.is_empty() {
            println!("\nDependencies:");
            for dep in &info.dependencies {
                println!("  • {}", dep);
            }
        }
        if info.closure.len() > info.dependencies.len() {
            println!("\nSelected along with it:");
            for dep in &info.closure {
                println!("  • {}", dep);
            }
        }
        if !info.fields.is_empty() {
            println!("\nSettings:");
            for field in &info.fields {
                let mut notes = vec![field.kind.to_string()];
                if field.generated {
                    notes.push("generated".to_string());
                }
                if field.required {
                    notes.push("required".to_string());
                }
                if let Some(default) = &field.default {
                    notes.push(format!("default: {}", default));
                }
                if let Some(condition) = &field.condition {
                    notes.push(format!("when {}", condition));
                }
                println!("  • {} ({})", field.key, notes.join(", "));
                if !field.description.is_empty() {
                    println!("    {}", field.description);
                }
            }
        }
        return Ok(());
    }

    let listings = crate::app::api::list(&catalog, group.as_deref())?;
    if json {
        println!("{}", to_json(&listings)?);
        return Ok(());
    }

    for listing in listings {
        println!("{}:", listing.label);
        for service in listing.services {
            let marker = if service.always_on { " (always on)" } else { "" };
            println!("  {} - {}{}", service.id, service.description, marker);
        }
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Serialization(e.to_string()))
}
