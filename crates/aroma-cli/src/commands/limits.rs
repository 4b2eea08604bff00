use aroma_core::error::AromaError;
use aroma_core::model::MediumType;
use aroma_core::rules::builtin;
use aroma_core::rules::schema::LimitsDef;
use std::path::Path;

use crate::output;

pub fn show(preset: &str, output_format: &str) -> Result<(), AromaError> {
    let limits = builtin::load_preset(preset)?;
    match output_format {
        "json" => output::json::print(&limits)?,
        _ => explain(&limits),
    }
    Ok(())
}

fn explain(limits: &LimitsDef) {
    println!("{} (version {})\n", limits.name, limits.version);
    if let Some(ref desc) = limits.description {
        println!("{}\n", desc);
    }

    println!(
        "Daily skin contact: ceiling {} ml, advisory above {} ml",
        limits.daily.skin_contact_ceiling_ml, limits.daily.advisory_threshold_ml
    );
    println!(
        "One drop = {} ml; batches without a base quantity count as {}\n",
        limits.drop_volume_ml, limits.default_base_amount
    );

    println!("Total concentration ceilings (warning above {}x):", limits.warning_fraction);
    for medium in MediumType::ALL {
        let skin = if medium.is_skin_contact() { "" } else { "  (not skin contact)" };
        println!(
            "  {:<16} {:>6}%  {}{}",
            medium.as_str(),
            limits.medium_ceiling(medium),
            medium.display_name(),
            skin
        );
    }
    println!();

    println!("Individual oil caps:");
    let max_name = limits.oil_caps.keys().map(|k| k.chars().count()).max().unwrap_or(10);
    for (name, cap) in &limits.oil_caps {
        let pad = max_name.saturating_sub(name.chars().count());
        println!("  {}{}  {:>5}%", name, " ".repeat(pad * 2), cap);
    }
    println!(
        "  (other oils: {}% in alcohol, {}% in footbaths, otherwise {}%)\n",
        limits.conservative_limit(MediumType::Alcohol),
        limits.conservative_limit(MediumType::Footbath),
        limits.conservative_default
    );

    if !limits.references.is_empty() {
        println!("References:");
        for r in &limits.references {
            match r.note {
                Some(ref note) => println!("  {} <= {}%  {}", r.name, r.max, note),
                None => println!("  {} <= {}%", r.name, r.max),
            }
        }
        println!();
    }
}

pub fn validate(file: &Path) -> Result<(), AromaError> {
    let limits = aroma_core::rules::load_limits(file)?;

    println!("Limits table '{}' (v{}) is valid.", limits.name, limits.version);
    println!("  Medium ceilings: {}", limits.medium_ceilings.len());
    println!("  Oil caps: {}", limits.oil_caps.len());

    // Not errors, but usually a mistake in a hand-edited table
    let mut warnings = Vec::new();
    for medium in MediumType::ALL {
        if medium.is_skin_contact() && !limits.medium_ceilings.contains_key(&medium) {
            warnings.push(format!(
                "medium '{}' has no ceiling, default {}% applies",
                medium, limits.default_ceiling
            ));
        }
    }
    for (name, cap) in &limits.oil_caps {
        if cap.is_zero() {
            warnings.push(format!("oil '{}' has cap 0 and is barred from skin use", name));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }
    Ok(())
}
