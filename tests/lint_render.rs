//! Lint: detect key-hint text (`[X]`) rendered without click registration.
//!
//! Any `[X]`-style hint shown by a game's `render.rs` must also be tappable,
//! i.e. added through `push_clickable()`. A plain `cl.push(...)` renders the
//! hint but leaves it dead on touch screens, where there is no keyboard.

use std::fs;
use std::path::Path;

/// Check if a string contains a bracket-key pattern like `[U]`, `[C]`, `[1]`.
fn contains_bracket_key(s: &str) -> bool {
    s.as_bytes().windows(3).any(|w| {
        w[0] == b'[' && w[2] == b']' && (w[1].is_ascii_alphanumeric() || b"-=!~{}|\\".contains(&w[1]))
    })
}

/// Lines with a non-clickable `.push(` call that carries a bracket key.
fn find_bracket_key_in_push(source: &str) -> Vec<(usize, String)> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .filter(|(_, line)| contains_bracket_key(line))
        .filter(|(_, line)| line.contains(".push(") && !line.contains("push_clickable("))
        .map(|(i, line)| (i + 1, line.trim().to_string()))
        .collect()
}

#[test]
fn no_bracket_keys_in_non_clickable_push() {
    let games_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/games");
    let mut all_violations = Vec::new();

    visit_render_files(&games_dir, &mut all_violations);

    if !all_violations.is_empty() {
        let mut msg = String::from(
            "Found bracket-key text [X] in non-clickable cl.push() calls.\n\
             Use push_clickable() so the hint can be tapped.\n\n",
        );
        for (file, line_num, line) in &all_violations {
            msg.push_str(&format!("  {}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

#[test]
fn render_files_are_scanned() {
    let games_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/games");
    let mut found = Vec::new();
    collect_render_files(&games_dir, &mut found);
    assert!(!found.is_empty(), "no render.rs found under {}", games_dir.display());
}

fn collect_render_files(dir: &Path, out: &mut Vec<std::path::PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_render_files(&path, out);
        } else if path.file_name().is_some_and(|n| n == "render.rs") {
            out.push(path);
        }
    }
}

fn visit_render_files(dir: &Path, violations: &mut Vec<(String, usize, String)>) {
    let mut files = Vec::new();
    collect_render_files(dir, &mut files);
    for path in files {
        let Ok(source) = fs::read_to_string(&path) else {
            continue;
        };
        let display_path = path.display().to_string();
        for (line_num, line) in find_bracket_key_in_push(&source) {
            violations.push((display_path.clone(), line_num, line));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_bracket_key_in_push() {
        let source = r#"cl.push(Line::from(" [U] 購入"));"#;
        assert_eq!(find_bracket_key_in_push(source).len(), 1);
    }

    #[test]
    fn allows_push_clickable() {
        let source = r#"cl.push_clickable(Line::from(" [U] 購入"), BUY_UPGRADE);"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn ignores_comments() {
        let source = r#"// cl.push(Line::from(" [C] クリック"));"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn bracket_key_detection() {
        assert!(contains_bracket_key("[C]"));
        assert!(contains_bracket_key("[1]"));
        assert!(contains_bracket_key("[-]"));
        assert!(!contains_bracket_key("[]"));
        assert!(!contains_bracket_key("[UU]"));
        assert!(!contains_bracket_key("ab"));
    }
}
