use codemention_core::traits::CommentRenderer;
use codemention_core::{
    evaluate, parse_unified_diff, CommentConfiguration, MarkdownCommentRenderer, MatchedRule,
    MentionRule, PatternMatcher,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn generate_test_paths(count: usize) -> Vec<String> {
    let extensions = ["rs", "rb", "js", "ts", "yml", "md"];
    let directories = ["src", "spec", "db/migrate", ".github/workflows", "docs", "config"];

    (0..count)
        .map(|i| {
            let ext = extensions[i % extensions.len()];
            let dir = directories[i % directories.len()];
            format!("{}/subdir/file_{}.{}", dir, i, ext)
        })
        .collect()
}

fn generate_rules(count: usize) -> Vec<MentionRule> {
    let patterns = ["db/migrate/**", "spec/*.rb", ".github/**", "src/**/*.rs", "docs/**/*.md"];

    (0..count)
        .map(|i| MentionRule {
            patterns: vec![
                patterns[i % patterns.len()].to_string(),
                format!("team_{}/**", i),
            ],
            mentions: vec![
                format!("team-{}", i),
                "author".to_string(),
                "lead".to_string(),
            ],
        })
        .collect()
}

fn bench_pattern_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_matching");
    let matcher = PatternMatcher::new(&["src/**/*.rs", "!src/**/generated/**", ".github/**"]);

    for count in [100, 1_000, 10_000] {
        let paths = generate_test_paths(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &paths, |b, paths| {
            b.iter(|| black_box(matcher.filter(paths)));
        });
    }

    group.finish();
}

fn bench_evaluate_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_and_render");
    let renderer = MarkdownCommentRenderer::new();
    let paths = generate_test_paths(1_000);

    for rule_count in [5, 50, 200] {
        let rules = generate_rules(rule_count);
        group.bench_with_input(BenchmarkId::from_parameter(rule_count), &rules, |b, rules| {
            b.iter(|| {
                let matched = evaluate(rules, &paths, "author");
                black_box(renderer.render(&matched, None).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_template(c: &mut Criterion) {
    let mut group = c.benchmark_group("template");
    let renderer = MarkdownCommentRenderer::new();
    let rules: Vec<MatchedRule> = (0..50)
        .map(|i| MatchedRule {
            patterns: vec![format!("dir_{}/**", i), "*.md".to_string()],
            mentions: vec!["a".to_string(), "b".to_string()],
            matched_files: vec![format!("dir_{}/x.rs", i)],
        })
        .collect();

    group.bench_function("render_default", |b| {
        b.iter(|| black_box(renderer.render(black_box(&rules), None).unwrap()));
    });

    let custom = CommentConfiguration {
        template: Some(
            concat!(
                "{{#each mentions}}@{{name}}: ",
                "{{#each matchedFiles}}{{markdownEscape this}} {{/each}}\n",
                "{{/each}}"
            )
            .to_string(),
        ),
        ..Default::default()
    };
    group.bench_function("render_mentions_template", |b| {
        b.iter(|| black_box(renderer.render(black_box(&rules), Some(&custom)).unwrap()));
    });

    group.finish();
}

fn bench_diff_parsing(c: &mut Criterion) {
    let diff: String = generate_test_paths(1_000)
        .iter()
        .map(|p| {
            format!(
                concat!(
                    "diff --git a/{p} b/{p}\nindex 1111111..2222222 100644\n",
                    "--- a/{p}\n+++ b/{p}\n@@ -1 +1 @@\n-old\n+new\n"
                ),
                p = p
            )
        })
        .collect();

    c.bench_function("parse_unified_diff_1000_files", |b| {
        b.iter(|| black_box(parse_unified_diff(black_box(&diff))));
    });
}

criterion_group!(
    benches,
    bench_pattern_matching,
    bench_evaluate_and_render,
    bench_template,
    bench_diff_parsing
);
criterion_main!(benches);
