use std::fmt::Write;

use tera::escape_html;

use super::{
    Anchor, Assets, Certificate, Family, ImageBox, Region, Rule, TextLine, PAGE_HEIGHT_MM,
    PAGE_WIDTH_MM, PT_TO_MM,
};

const SANS_STACK: &str = "Arimo, Calibri, Arial, Helvetica, sans-serif";
const SERIF_STACK: &str = "'Times New Roman', TimesNewRoman, serif";

fn family_stack(family: Family) -> &'static str {
    match family {
        Family::Sans => SANS_STACK,
        Family::Serif => SERIF_STACK,
    }
}

fn anchor_attr(anchor: Anchor) -> &'static str {
    match anchor {
        Anchor::Start => "start",
        Anchor::Middle => "middle",
        Anchor::End => "end",
    }
}

pub(super) fn write(cert: &Certificate, assets: &Assets) -> String {
    let mut out = String::with_capacity(16 * 1024);
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" id="certificate-root" width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}">"#,
        w = PAGE_WIDTH_MM,
        h = PAGE_HEIGHT_MM,
    );
    let _ = write!(
        out,
        r##"<rect x="0" y="0" width="{}" height="{}" fill="#ffffff"/>"##,
        PAGE_WIDTH_MM, PAGE_HEIGHT_MM
    );

    for region in &cert.regions {
        match region {
            Region::Text(line) => text(&mut out, line),
            Region::Rule(rule) => rule_line(&mut out, rule),
            Region::Logo(frame) => logo(&mut out, frame, assets),
        }
    }

    out.push_str("</svg>");
    out
}

fn text(out: &mut String, line: &TextLine) {
    let _ = write!(
        out,
        r#"<text xml:space="preserve" x="{:.2}" y="{:.2}" font-size="{:.3}" fill="{}" text-anchor="{}" font-family="{}""#,
        line.x,
        line.y,
        line.size_pt * PT_TO_MM,
        line.color,
        anchor_attr(line.anchor),
        SANS_STACK,
    );
    if let Some(width) = line.justify {
        let _ = write!(out, r#" textLength="{:.2}" lengthAdjust="spacing""#, width);
    }
    out.push('>');

    for run in &line.runs {
        let weight = if run.bold { "bold" } else { "normal" };
        let _ = write!(
            out,
            r#"<tspan font-family="{}" font-weight="{}">{}</tspan>"#,
            family_stack(run.family),
            weight,
            escape_html(&run.text.replace(char::is_control, "")),
        );
    }
    out.push_str("</text>");
}

fn rule_line(out: &mut String, rule: &Rule) {
    let _ = write!(
        out,
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}"/>"#,
        rule.x1, rule.y1, rule.x2, rule.y2, rule.color, rule.stroke_mm,
    );
}

fn logo(out: &mut String, frame: &ImageBox, assets: &Assets) {
    let Some(logo) = &assets.logo else {
        return;
    };
    let _ = write!(
        out,
        r#"<image x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" preserveAspectRatio="xMidYMid meet" xlink:href="{}"/>"#,
        frame.x,
        frame.y,
        frame.width,
        frame.height,
        logo.data_uri(),
    );
}
