use crate::app::commands::CommandOutput;
use crate::domain::model::{GainBand, GainPeriod, GrowthStandardRow, Metric, ValueRange};
use std::fmt::Write;

/// Human-readable rendering of a command result.
pub fn render_text(output: &CommandOutput) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = write_output(&mut out, output);
    out
}

fn write_output(out: &mut String, output: &CommandOutput) -> std::fmt::Result {
    match output {
        CommandOutput::Lookup { sex, row } => {
            writeln!(out, "📏 WHO standard ({}, {:.2} months)", sex, row.age_months)?;
            write_row(out, row)?;
        }
        CommandOutput::Expected {
            sex,
            age_months,
            growth,
        } => {
            writeln!(out, "📈 Expected monthly growth ({}, {} months)", sex, age_months)?;
            writeln!(out, "  Weight: {} g", growth.weight_g)?;
            writeln!(out, "  Height: {} mm", growth.height_mm)?;
            writeln!(out, "  Head circumference: {} mm", growth.head_circ_mm)?;
        }
        CommandOutput::Progress(result) => {
            writeln!(out, "🎯 Progress: {}%", result.percentage)?;
            writeln!(out, "  Birth value: {}", result.birth_value)?;
            writeln!(out, "  Current: {}", result.current_total)?;
            writeln!(out, "  Target: {}", result.target)?;
            writeln!(
                out,
                "  Growth: {} of {} expected",
                result.actual_growth, result.expected_growth
            )?;
        }
        CommandOutput::StandardProgress {
            metric,
            measurement,
            percentage,
        } => {
            writeln!(
                out,
                "🎯 {} {} {} is {}% of the WHO standard",
                metric, measurement.value, measurement.unit, percentage
            )?;
        }
        CommandOutput::Recommendations(bundle) => {
            writeln!(out, "📋 Recommendations ({})", bundle.age_group_label())?;
            write_row(out, &bundle.who_standard)?;
            writeln!(out, "  Gain bands:")?;
            for metric in Metric::ALL {
                write_band(out, metric, &bundle.gain_band(metric))?;
            }
            writeln!(out, "  Expected values:")?;
            for metric in Metric::ALL {
                write_range(out, metric, &bundle.expected_range(metric))?;
            }
        }
        CommandOutput::Assessment { on, assessment } => {
            writeln!(
                out,
                "🩺 Assessment on {} ({}, {:.1} months, {})",
                on,
                assessment.sex,
                assessment.age_months,
                assessment.age_group.label()
            )?;
            for metric in &assessment.metrics {
                let observed = match metric.observed_gain {
                    Some(gain) => format!(
                        "{:.0} {}/{}",
                        gain,
                        metric.metric.gain_unit(),
                        period_name(metric.band.period)
                    ),
                    None => "n/a".to_string(),
                };
                writeln!(
                    out,
                    "  {}: {}% of target, last gain {}, band {}-{}: {}",
                    metric.metric,
                    metric.progress.percentage,
                    observed,
                    metric.band.min,
                    metric.band.max,
                    metric.status
                )?;
            }
            writeln!(out, "  Overall: {}", assessment.overall)?;
        }
        CommandOutput::TableCsv { csv, .. } => {
            out.push_str(csv);
        }
        CommandOutput::TableWritten { sex, path, rows } => {
            writeln!(out, "📁 Wrote {} {} rows to {}", rows, sex, path)?;
        }
    }
    Ok(())
}

fn write_row(out: &mut String, row: &GrowthStandardRow) -> std::fmt::Result {
    writeln!(out, "  Weight: {:.2} kg", row.weight_kg)?;
    writeln!(out, "  Height: {:.1} cm", row.height_cm)?;
    writeln!(out, "  Head circumference: {:.1} cm", row.head_circ_cm)
}

fn write_band(out: &mut String, metric: Metric, band: &GainBand) -> std::fmt::Result {
    writeln!(
        out,
        "    {}: {} {unit}/{period} (acceptable {}-{} {unit})",
        metric,
        band.expected,
        band.min,
        band.max,
        unit = metric.gain_unit(),
        period = period_name(band.period)
    )
}

fn write_range(out: &mut String, metric: Metric, range: &ValueRange) -> std::fmt::Result {
    writeln!(
        out,
        "    {}: {:.2}-{:.2} {}",
        metric,
        range.min,
        range.max,
        metric.standard_unit()
    )
}

fn period_name(period: GainPeriod) -> &'static str {
    match period {
        GainPeriod::Weekly => "week",
        GainPeriod::Monthly => "month",
    }
}
