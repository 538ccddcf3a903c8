//! Terminal rendering of a DashboardView

use std::fmt::Write;

use super::views::{Bar, DashboardView, GraphKind};

/// Width of the longest bar, in characters
const BAR_WIDTH: usize = 40;

/// Render the visible panel and the student selector as plain text
pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();

    let Some(kind) = view.panels.visible() else {
        out.push_str("No data available\n");
        return out;
    };

    let _ = panel(&mut out, view, kind);
    out
}

/// Write one panel followed by the student selector line
fn panel(out: &mut String, view: &DashboardView, kind: GraphKind) -> std::fmt::Result {
    match kind {
        GraphKind::Combined => combined(out, view),
        GraphKind::Student => student(out, view),
        GraphKind::Pie => pie(out, view),
        GraphKind::Line => line(out, view),
        GraphKind::Table => table(out, view),
    }?;

    if !view.student_options.is_empty() {
        writeln!(out, "\nStudents: {}", view.student_options.join(", "))?;
    }
    Ok(())
}

fn combined(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    writeln!(out, "All Students - Subject-wise Marks")?;

    let max = view
        .combined
        .iter()
        .flat_map(|series| series.bars.iter())
        .map(|bar| bar.marks)
        .max()
        .unwrap_or(0);

    for series in &view.combined {
        writeln!(out, "\n[{}]", series.subject)?;
        bars(out, &series.bars, max)?;
    }
    Ok(())
}

fn student(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    match &view.student {
        None => writeln!(out, "Select a student to see the student-wise graph"),
        Some(student) => {
            writeln!(out, "{}'s Performance\n", student.name)?;
            if student.bars.is_empty() {
                return writeln!(out, "  (no records)");
            }
            let max = student.bars.iter().map(|bar| bar.marks).max().unwrap_or(0);
            bars(out, &student.bars, max)
        }
    }
}

fn pie(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    writeln!(out, "Average Marks by Subject\n")?;

    let total: f64 = view.subject_averages.iter().map(|a| a.average).sum();
    let width = label_width(view.subject_averages.iter().map(|a| a.subject.as_str()));

    for average in &view.subject_averages {
        let share = if total > 0.0 {
            average.average / total * 100.0
        } else {
            0.0
        };
        writeln!(
            out,
            "  {:<width$}  {:>7.2}  {:>5.1}%",
            average.subject, average.average, share
        )?;
    }
    Ok(())
}

fn line(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    writeln!(out, "Subject-wise Performance Trend\n")?;

    let max = view
        .subject_averages
        .iter()
        .map(|a| a.average)
        .fold(0.0_f64, f64::max);
    let width = label_width(view.subject_averages.iter().map(|a| a.subject.as_str()));

    for average in &view.subject_averages {
        let offset = scaled(average.average, max);
        writeln!(
            out,
            "  {:<width$}  {:>7.2}  {}o",
            average.subject,
            average.average,
            " ".repeat(offset)
        )?;
    }
    Ok(())
}

fn table(out: &mut String, view: &DashboardView) -> std::fmt::Result {
    writeln!(out, "Complete Marks Table\n")?;

    let name_width = label_width(view.table.iter().map(|s| s.name.as_str())).max(4);
    let subject_width = label_width(view.table.iter().map(|s| s.subject.as_str())).max(7);

    writeln!(out, "  {:<name_width$}  {:<subject_width$}  {:>5}", "Name", "Subject", "Marks")?;
    for student in &view.table {
        writeln!(
            out,
            "  {:<name_width$}  {:<subject_width$}  {:>5}",
            student.name, student.subject, student.marks
        )?;
    }
    Ok(())
}

fn bars(out: &mut String, bars: &[Bar], max: i64) -> std::fmt::Result {
    let width = label_width(bars.iter().map(|bar| bar.label.as_str()));

    for bar in bars {
        let len = scaled(bar.marks as f64, max as f64);
        writeln!(
            out,
            "  {:<width$}  {:>5}  {}",
            bar.label,
            bar.marks,
            "#".repeat(len)
        )?;
    }
    Ok(())
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|label| label.chars().count()).max().unwrap_or(0)
}

/// Map `value` onto 0..=BAR_WIDTH relative to `max`; negatives draw nothing
fn scaled(value: f64, max: f64) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * BAR_WIDTH as f64).round() as usize
}
