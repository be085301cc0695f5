use super::{Family, Run, PT_TO_MM};

// Approximate advance widths in em, Helvetica-class metrics.
fn advance_em(c: char) -> f32 {
    match c {
        ' ' => 0.278,
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' | '‘' | '’' => 0.24,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '/' | '-' => 0.333,
        'm' | 'M' | 'W' => 0.833,
        'w' => 0.722,
        'A'..='Z' => 0.667,
        _ => 0.556,
    }
}

pub fn measure(text: &str, size_pt: f32, family: Family, bold: bool) -> f32 {
    let em: f32 = text.chars().map(advance_em).sum();
    let family_factor = match family {
        Family::Sans => 1.0,
        Family::Serif => 0.92,
    };
    let weight_factor = if bold { 1.06 } else { 1.0 };
    em * size_pt * PT_TO_MM * family_factor * weight_factor
}

fn run_width(run: &Run, size_pt: f32) -> f32 {
    measure(&run.text, size_pt, run.family, run.bold)
}

#[derive(Debug, Clone)]
struct Word {
    parts: Vec<Run>,
}

impl Word {
    fn width(&self, size_pt: f32) -> f32 {
        self.parts.iter().map(|p| run_width(p, size_pt)).sum()
    }
}

fn split_words(runs: &[Run]) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();
    let mut glue = false;

    for run in runs {
        if run.text.is_empty() {
            continue;
        }
        let starts_ws = run.text.starts_with(char::is_whitespace);

        for (i, piece) in run.text.split_whitespace().enumerate() {
            let part = Run {
                text: piece.to_string(),
                family: run.family,
                bold: run.bold,
            };
            if i == 0 && glue && !starts_ws {
                if let Some(last) = words.last_mut() {
                    last.parts.push(part);
                    continue;
                }
            }
            words.push(Word { parts: vec![part] });
        }

        glue = !run.text.ends_with(char::is_whitespace);
    }

    words
}

fn push_run(runs: &mut Vec<Run>, part: &Run) {
    if let Some(last) = runs.last_mut() {
        if last.family == part.family && last.bold == part.bold {
            last.text.push_str(&part.text);
            return;
        }
    }
    runs.push(part.clone());
}

fn assemble(line: &[Word]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for (i, word) in line.iter().enumerate() {
        if i > 0 {
            if let Some(last) = runs.last_mut() {
                last.text.push(' ');
            }
        }
        for part in &word.parts {
            push_run(&mut runs, part);
        }
    }
    runs
}

pub fn wrap(runs: &[Run], size_pt: f32, width_mm: f32) -> Vec<Vec<Run>> {
    let space = measure(" ", size_pt, Family::Sans, false);
    let mut lines: Vec<Vec<Word>> = Vec::new();
    let mut current: Vec<Word> = Vec::new();
    let mut current_width = 0.0;

    for word in split_words(runs) {
        let w = word.width(size_pt);
        if !current.is_empty() && current_width + space + w > width_mm {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }
        if !current.is_empty() {
            current_width += space;
        }
        current_width += w;
        current.push(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.iter().map(|line| assemble(line)).collect()
}
