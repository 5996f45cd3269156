// benches/weeks.rs
use std::hint::black_box;

use chrono::{Days, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};

use ponto_harvest::model::RawDayEntry;
use ponto_harvest::specs::ponto;
use ponto_harvest::weeks::aggregate_weeks;

const LABELS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

fn first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// A consult page the size of one pay period, rendered like the portal does.
fn synthetic_page(days: u64) -> String {
    let mut doc = String::from(r#"<html><body><a style="float: left" href="?p=1">&lt;</a><table>"#);
    doc.push_str("<tr><th>Data</th><th>Jornada</th><th>Marcações</th></tr>");
    for i in 0..days {
        let date = first_day() + Days::new(i);
        doc.push_str(&format!(
            r#"<tr class="maozinha"><td label="Data">{} - {}</td><td>08:00 - 17:00</td><td><span>08:0{}</span> <span>12:00</span> <span>13:00</span> <span>17:1{}</span></td></tr>"#,
            date.format("%d/%m/%Y"),
            LABELS[(i % 7) as usize],
            i % 10,
            i % 10,
        ));
    }
    doc.push_str("</table></body></html>");
    doc
}

fn year_of_entries() -> Vec<RawDayEntry> {
    (0..366)
        .map(|i| {
            let date = first_day() + Days::new(i);
            RawDayEntry::new(format!("{} - Dia", date.format("%d/%m/%Y")), 8.0 + (i % 3) as f64 * 0.25)
        })
        .collect()
}

fn bench_extract(c: &mut Criterion) {
    let doc = synthetic_page(31);

    c.bench_function("parse_rows", |b| {
        b.iter(|| black_box(ponto::parse_rows(black_box(&doc))).len())
    });

    let rows = ponto::parse_rows(&doc);
    c.bench_function("extract_days", |b| {
        b.iter(|| black_box(ponto::extract_days(black_box(&rows))).len())
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let entries = year_of_entries();
    c.bench_function("aggregate_weeks_year", |b| {
        b.iter(|| aggregate_weeks(black_box(&entries), 44.0).map(|w| w.len()))
    });
}

criterion_group!(benches, bench_extract, bench_aggregate);
criterion_main!(benches);
