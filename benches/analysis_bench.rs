//! Benchmarks for CHA/RTA call graph construction.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use sol_callgraph::domain::hierarchy::build_class_hierarchy;
use sol_callgraph::{Ast, ChaEngine, EngineOptions, RtaEngine};

// ═══════════════════════════════════════════════════════════════════════════
// Synthetic Data Generators
// ═══════════════════════════════════════════════════════════════════════════

/// A source unit with `num_contracts` contracts of `funcs_per_contract`
/// functions, each making `calls_per_func` calls. Every other contract
/// inherits from its predecessor and every third one is instantiated.
fn create_synthetic_ast(num_contracts: usize, funcs_per_contract: usize, calls_per_func: usize) -> Ast {
    let contracts: Vec<Value> = (0..num_contracts)
        .map(|c| {
            let functions: Vec<Value> = (0..funcs_per_contract)
                .map(|f| {
                    let mut statements: Vec<Value> = (0..calls_per_func)
                        .map(|k| {
                            let target = format!("func_{}", (f + k + 1) % funcs_per_contract);
                            json!({
                                "nodeType": "ExpressionStatement",
                                "expression": {
                                    "nodeType": "FunctionCall",
                                    "expression": {
                                        "nodeType": "MemberAccess",
                                        "memberName": target,
                                        "expression": { "nodeType": "Identifier", "name": "this" }
                                    }
                                }
                            })
                        })
                        .collect();
                    if f == 0 && c % 3 == 0 {
                        statements.push(json!({
                            "nodeType": "NewExpression",
                            "typeName": { "pathNode": { "name": format!("Contract{}", c) } }
                        }));
                    }
                    json!({
                        "nodeType": "FunctionDefinition",
                        "name": format!("func_{}", f),
                        "kind": "function",
                        "body": { "nodeType": "Block", "statements": statements }
                    })
                })
                .collect();

            let bases: Vec<Value> = if c % 2 == 1 {
                vec![json!({ "baseName": { "name": format!("Contract{}", c - 1) } })]
            } else {
                vec![]
            };

            json!({
                "nodeType": "ContractDefinition",
                "name": format!("Contract{}", c),
                "baseContracts": bases,
                "nodes": functions
            })
        })
        .collect();

    Ast::from_value(&json!({ "nodeType": "SourceUnit", "nodes": contracts })).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// Engine Benchmarks
// ═══════════════════════════════════════════════════════════════════════════

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("callgraph/engines");

    for num_contracts in [10, 50, 100].iter() {
        let ast = create_synthetic_ast(*num_contracts, 10, 5);
        group.throughput(Throughput::Elements((*num_contracts * 10) as u64));

        group.bench_with_input(BenchmarkId::new("cha", num_contracts), &ast, |b, ast| {
            b.iter(|| ChaEngine::new().analyze(black_box(ast)))
        });
        group.bench_with_input(BenchmarkId::new("rta", num_contracts), &ast, |b, ast| {
            b.iter(|| RtaEngine::new().analyze(black_box(ast)))
        });
    }

    group.finish();
}

// ═══════════════════════════════════════════════════════════════════════════
// Sequential vs Parallel
// ═══════════════════════════════════════════════════════════════════════════

fn bench_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("callgraph/parallel");
    group.sample_size(30);

    let ast = create_synthetic_ast(100, 20, 10);
    let hierarchy = build_class_hierarchy(&ast);

    group.bench_function("sequential", |b| {
        let engine = ChaEngine::new();
        b.iter(|| engine.analyze_with_hierarchy(black_box(&ast), &hierarchy))
    });
    group.bench_function("parallel", |b| {
        let engine = ChaEngine::with_options(EngineOptions { parallel: true });
        b.iter(|| engine.analyze_with_hierarchy(black_box(&ast), &hierarchy))
    });

    group.finish();
}

criterion_group!(benches, bench_engines, bench_parallel);
criterion_main!(benches);
