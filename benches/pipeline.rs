//! Benchmarks for the axess pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use axess::macros::Registry;
use axess::normalize::normalize;
use axess::strip::strip_comments;
use axess::{expand_document, ExpandOptions};

/// A synthetic document: a preamble with macro definitions, then `lines`
/// body lines mixing invocations, comments and math.
fn synthetic_document(lines: usize) -> String {
    let mut doc = String::from(
        "\\documentclass{article}\n\
         \\newcommand{\\LL}{\\mathcal{L}^2}\n\
         \\newcommand{\\norm}[1]{\\left\\|#1\\right\\|}\n\
         \\def\\F{\\mathcal{F}}\n\
         \\begin{document}\n",
    );
    for i in 0..lines {
        match i % 4 {
            0 => doc.push_str("Plain text with a % trailing comment\n"),
            1 => doc.push_str("Inline math $\\norm{f}_{\\LL}$ mid sentence\n"),
            2 => doc.push_str("Display $$\\F(x) = \\int f$$ here\n"),
            _ => doc.push_str("\\norm{\\F(g)} and more $x$ text\n"),
        }
    }
    doc.push_str("\\end{document}\n");
    doc
}

// -- Comment stripping benchmarks --

fn bench_strip(c: &mut Criterion) {
    let mut group = c.benchmark_group("strip");

    let small = synthetic_document(20);
    let large = synthetic_document(2000);

    group.bench_function("strip_small", |b| {
        b.iter(|| strip_comments(black_box(&small)))
    });

    group.bench_function("strip_large", |b| {
        b.iter(|| strip_comments(black_box(&large)))
    });

    group.finish();
}

// -- Expansion benchmarks --

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");

    let small = strip_comments(&synthetic_document(20));
    let large = strip_comments(&synthetic_document(2000));
    let registry_small = Registry::from_preamble(&small);
    let registry_large = Registry::from_preamble(&large);
    let opts = ExpandOptions::default();

    group.bench_function("expand_small", |b| {
        b.iter(|| expand_document(black_box(&small), &registry_small, &opts).unwrap())
    });

    group.bench_function("expand_large", |b| {
        b.iter(|| expand_document(black_box(&large), &registry_large, &opts).unwrap())
    });

    group.finish();
}

// -- Normalization benchmarks --

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let mut body = String::new();
    for i in 0..500 {
        match i % 3 {
            0 => body.push_str("text $a + b$ more $$c$$\n"),
            1 => body.push_str("\\begin{tabular} $x$ & $y$ \\end{tabular}\n"),
            _ => body.push_str("\\mbox{boxed $u$} outside $v$\n"),
        }
    }

    group.bench_function("normalize_mixed", |b| {
        b.iter(|| normalize(black_box(&body)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_strip, bench_expand, bench_normalize);
criterion_main!(benches);
