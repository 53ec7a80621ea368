//! Locator Operations Benchmarks
//!
//! Benchmarks for strategy generation, scoring and ranking.
//!
//! Run with: `cargo bench --bench locator_ops`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pinpoint::prelude::*;
use pinpoint::{absolute_xpath, CssGenerator, LocatorGenerator, XPathGenerator};

fn page_with_rows(rows: usize) -> String {
    let mut html = String::from("<html><body><table class=\"data-table\"><tbody>");
    for i in 0..rows {
        html.push_str(&format!(
            "<tr class=\"row\"><td class=\"cell\">{i}</td><td><button class=\"btn btn-sm\">Edit</button></td></tr>"
        ));
    }
    html.push_str("</tbody></table><button id=\"save\" data-testid=\"save\">Save</button></body></html>");
    html
}

fn bench_generate_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_all_strategies");
    let engine = LocatorEngine::default();

    for rows in [10, 100, 500] {
        let page = HtmlPage::parse(&page_with_rows(rows));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{rows}_rows")), &page, |bench, page| {
            let doc = page.document();
            let target = doc.query_selector("tr:last-child button").unwrap().unwrap();
            bench.iter(|| {
                let all = engine.generate_all_strategies(black_box(&target), &doc).unwrap();
                black_box(all);
            });
        });
    }

    group.finish();
}

fn bench_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("generators");
    let page = HtmlPage::parse(&page_with_rows(100));
    let doc = page.document();
    let scorer = ConfidenceScorer::default();
    let id_target = doc.element_by_id("save").unwrap();
    let nested = doc.query_selector("tr:nth-child(50) td.cell").unwrap().unwrap();

    group.bench_function("css_id", |bench| {
        bench.iter(|| black_box(CssGenerator::default().generate(&id_target, &doc, &scorer).unwrap()));
    });
    group.bench_function("css_hierarchy", |bench| {
        bench.iter(|| black_box(CssGenerator::default().generate(&nested, &doc, &scorer).unwrap()));
    });
    group.bench_function("xpath_positional", |bench| {
        bench.iter(|| black_box(XPathGenerator::default().generate(&nested, &doc, &scorer).unwrap()));
    });
    group.bench_function("absolute_xpath", |bench| {
        bench.iter(|| black_box(absolute_xpath(&nested)));
    });

    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");
    let page = HtmlPage::parse(&page_with_rows(100));
    let doc = page.document();
    let scorer = ConfidenceScorer::default();
    let target = doc.element_by_id("save").unwrap();

    let candidates = [
        ("id", LocatorType::Id, "#save"),
        ("test_attribute", LocatorType::Css, "[data-testid=\"save\"]"),
        ("class", LocatorType::Class, ".btn.btn-sm"),
        ("xpath", LocatorType::Xpath, "//button[@data-testid=\"save\"]"),
    ];
    for (name, locator_type, selector) in candidates {
        group.bench_with_input(BenchmarkId::from_parameter(name), &selector, |bench, sel| {
            bench.iter(|| black_box(scorer.assess(locator_type, black_box(sel), &target, &doc)));
        });
    }

    group.finish();
}

fn bench_xpath_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_xpath");

    for rows in [100, 1000, 4000] {
        let page = HtmlPage::parse(&page_with_rows(rows));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{rows}_rows")), &page, |bench, page| {
            let doc = page.document();
            bench.iter(|| {
                let cells = doc.evaluate_xpath(black_box("//table//td")).unwrap();
                let save = doc.evaluate_xpath(black_box(r#"//*[@id="save"]"#)).unwrap();
                black_box((cells, save));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate_all, bench_generators, bench_scoring, bench_xpath_queries);
criterion_main!(benches);
