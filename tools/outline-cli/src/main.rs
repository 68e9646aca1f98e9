use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use docx_io::inspect::inspect_docx;
use docx_io::reader::read_docx_to_paragraphs;
use docx_io::writer::write_docx;
use outline_classifier::contextual::refine_levels_contextually;
use outline_classifier::grouping::summarize;
use outline_classifier::pattern_table::PatternTable;
use outline_model::{ClassifiedParagraph, ParagraphRecord};

fn print_usage() {
    eprintln!(
        "Usage:\n\
         outline-cli extract <in.docx> [--out FILE.json]\n\
         outline-cli classify <in.docx|in.json> [--out FILE.json] [--contextual]\n\
         outline-cli rebuild <in.json> <out.docx>\n\
         outline-cli preview <in.json> [--out FILE.txt]\n\
         outline-cli inspect <in.docx>\n\
         \n\
         JSON files are arrays of paragraph objects (camelCase fields);\n\
         classify accepts either a .docx package or an extracted JSON.\n"
    );
}

fn main() {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_usage();
        std::process::exit(2);
    }
    let cmd = args.remove(0);
    let result = match cmd.as_str() {
        "extract" => do_extract(args),
        "classify" => do_classify(args),
        "rebuild" => do_rebuild(args),
        "preview" => do_preview(args),
        "inspect" => do_inspect(args),
        _ => {
            print_usage();
            std::process::exit(2);
        }
    };
    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn take_flag(args: &mut Vec<String>, name: &str) -> bool {
    match args.iter().position(|a| a == name) {
        Some(i) => {
            args.remove(i);
            true
        }
        None => false,
    }
}

fn take_opt(args: &mut Vec<String>, name: &str) -> Result<Option<String>, String> {
    match args.iter().position(|a| a == name) {
        Some(i) => {
            if i + 1 >= args.len() {
                return Err(format!("{name} requires a value"));
            }
            let value = args.remove(i + 1);
            args.remove(i);
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

fn positional(args: &mut Vec<String>, what: &str) -> Result<String, String> {
    if args.is_empty() || args[0].starts_with('-') {
        return Err(format!("missing {what}"));
    }
    Ok(args.remove(0))
}

fn default_out(input: &str, suffix: &str) -> String {
    let stem = Path::new(input)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    format!("{stem}{suffix}")
}

fn do_extract(mut args: Vec<String>) -> Result<(), String> {
    let input = positional(&mut args, "input .docx")?;
    let out = take_opt(&mut args, "--out")?.unwrap_or_else(|| default_out(&input, "_paragraphs.json"));

    let records = read_docx_to_paragraphs(Path::new(&input)).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&records).map_err(|e| e.to_string())?;
    fs::write(&out, json).map_err(|e| format!("write {out}: {e}"))?;

    println!("Extracted {} paragraphs from: {input}", records.len());
    println!("Paragraphs saved to: {out}");
    Ok(())
}

fn load_records(input: &str) -> Result<Vec<ParagraphRecord>, String> {
    if input.ends_with(".docx") {
        return read_docx_to_paragraphs(Path::new(input)).map_err(|e| e.to_string());
    }
    let raw = fs::read_to_string(input).map_err(|e| format!("read {input}: {e}"))?;
    serde_json::from_str(&raw).map_err(|e| format!("parse {input}: {e}"))
}

fn do_classify(mut args: Vec<String>) -> Result<(), String> {
    let input = positional(&mut args, "input .docx or .json")?;
    let contextual = take_flag(&mut args, "--contextual");
    let out = take_opt(&mut args, "--out")?.unwrap_or_else(|| default_out(&input, "_classified.json"));

    let records = load_records(&input)?;
    let table = PatternTable::new();
    let mut classified = outline_classifier::classify(&records, &table);
    if contextual {
        refine_levels_contextually(&mut classified, &table);
    }

    let json = serde_json::to_string_pretty(&classified).map_err(|e| e.to_string())?;
    fs::write(&out, json).map_err(|e| format!("write {out}: {e}"))?;
    println!("Classified paragraphs saved to: {out}");

    let summary = summarize(&classified, &table);
    println!();
    println!("=== CLASSIFICATION SUMMARY ===");
    println!("Total paragraphs: {}", summary.total_paragraphs);
    println!("List items: {}", summary.list_items);
    println!("Non-list items: {}", summary.non_list_items);
    println!("List groups: {}", summary.group_count);
    println!("Level distribution: {:?}", summary.level_distribution);
    println!("Format distribution: {:?}", summary.format_distribution);
    Ok(())
}

fn load_classified(input: &str) -> Result<Vec<ClassifiedParagraph>, String> {
    let raw = fs::read_to_string(input).map_err(|e| format!("read {input}: {e}"))?;
    serde_json::from_str(&raw).map_err(|e| format!("parse {input}: {e}"))
}

fn do_rebuild(mut args: Vec<String>) -> Result<(), String> {
    let input = positional(&mut args, "input .json")?;
    let out = positional(&mut args, "output .docx")?;

    let classified = load_classified(&input)?;
    write_docx(&classified, &PathBuf::from(&out)).map_err(|e| e.to_string())?;
    println!("Document saved to: {out}");
    Ok(())
}

/// Indent by level, prefix list items with their token; mirrors what the
/// rebuilt document should read like.
fn preview_line(para: &ClassifiedParagraph) -> Option<String> {
    if para.raw_text.trim().is_empty() {
        return None;
    }
    if let Some(token) = &para.numbering_token {
        let indent = "  ".repeat(para.level.unwrap_or(0) as usize);
        let content = para.cleaned_content.as_str();
        if content.is_empty() {
            Some(format!("{indent}{token}"))
        } else {
            Some(format!("{indent}{token} {content}"))
        }
    } else {
        Some(para.raw_text.trim().to_string())
    }
}

fn do_preview(mut args: Vec<String>) -> Result<(), String> {
    let input = positional(&mut args, "input .json")?;
    let out = take_opt(&mut args, "--out")?;

    let classified = load_classified(&input)?;
    let lines: Vec<String> = classified.iter().filter_map(preview_line).collect();

    match out {
        Some(path) => {
            fs::write(&path, lines.join("\n")).map_err(|e| format!("write {path}: {e}"))?;
            println!("Text preview saved to: {path}");
        }
        None => {
            for line in &lines {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn do_inspect(mut args: Vec<String>) -> Result<(), String> {
    let input = positional(&mut args, "input .docx")?;
    let summary = inspect_docx(Path::new(&input)).map_err(|e| e.to_string())?;

    println!("=== PACKAGE SUMMARY ===");
    println!("Parts ({}):", summary.parts.len());
    for part in &summary.parts {
        println!("  {part}");
    }
    println!("Paragraphs: {}", summary.paragraph_count);
    println!("Numbered paragraphs: {}", summary.numbered_paragraph_count);
    for a in &summary.abstract_numbering {
        println!("Abstract numbering {} ({} levels):", a.id, a.levels.len());
        for l in &a.levels {
            println!(
                "  ilvl={} numFmt={} lvlText={} start={}",
                l.ilvl.as_deref().unwrap_or("-"),
                l.num_fmt.as_deref().unwrap_or("-"),
                l.lvl_text.as_deref().unwrap_or("-"),
                l.start.as_deref().unwrap_or("-"),
            );
        }
    }
    for c in &summary.concrete_numbering {
        println!(
            "Numbering instance numId={} -> abstractNumId={}",
            c.num_id,
            c.abstract_num_id.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
