//! Performance benchmarks for the value analysis
//!
//! Synthetic loop-heavy functions: each loop bumps a counter, spills it to
//! its own stack slot and reloads it, so both the register file and the
//! stack block keep changing until the fixpoint.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use value_analysis::config::{AnalysisConfig, Preset};
use value_analysis::shared::models::{
    Addressing, BinaryOp, Chunk, Comparison, Condition, Function, FunctionBuilder, Instruction,
    NodeId, Operation, Program, Reg,
};
use value_analysis::{build_readonly_globals, FunctionAnalyzer, NoLiveness, ProgramAnalyzer};

/// `loops` consecutive counting loops, five nodes each, plus the return
fn loop_chain(name: &str, loops: u32) -> Function {
    let one = Reg(0);
    let mut b = FunctionBuilder::new(name).params(vec![Reg(1)]).node(
        0,
        Instruction::Op {
            op: Operation::IntConst(1),
            args: vec![],
            dest: one,
            succ: NodeId(1),
        },
    );

    for i in 0..loops {
        let base = 1 + i * 5;
        let counter = Reg(2 + i);
        let slot = i64::from(i) * 8;
        b = b
            .node(
                base,
                Instruction::Op {
                    op: Operation::IntConst(0),
                    args: vec![],
                    dest: counter,
                    succ: NodeId(base + 1),
                },
            )
            .node(
                base + 1,
                Instruction::Op {
                    op: Operation::Binary(BinaryOp::Add),
                    args: vec![counter, one],
                    dest: counter,
                    succ: NodeId(base + 2),
                },
            )
            .node(
                base + 2,
                Instruction::Store {
                    chunk: Chunk::Int32,
                    addr: Addressing::Stack(slot),
                    args: vec![],
                    src: counter,
                    succ: NodeId(base + 3),
                },
            )
            .node(
                base + 3,
                Instruction::Load {
                    chunk: Chunk::Int32,
                    addr: Addressing::Stack(slot),
                    args: vec![],
                    dest: counter,
                    succ: NodeId(base + 4),
                },
            )
            .node(
                base + 4,
                Instruction::Cond {
                    cond: Condition::CmpImm(Comparison::Lt, 100),
                    args: vec![counter],
                    ifso: NodeId(base + 1),
                    ifnot: NodeId(base + 5),
                },
            );
    }

    b.node(1 + loops * 5, Instruction::Return { arg: None }).build()
}

// ============================================================================
// Single function
// ============================================================================

fn bench_function_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("function_analysis");
    let config = AnalysisConfig::from_preset(Preset::Balanced);
    let romem = build_readonly_globals(&[], &config.readonly).unwrap();

    for loops in [1u32, 8, 32, 128] {
        let f = loop_chain("chain", loops);
        group.throughput(Throughput::Elements(f.node_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(loops), &f, |b, f| {
            let analyzer = FunctionAnalyzer::new(&romem, &config);
            b.iter(|| black_box(analyzer.analyze(f, &NoLiveness).unwrap()));
        });
    }

    group.finish();
}

// ============================================================================
// Whole program
// ============================================================================

fn bench_program_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("program_analysis");
    let program = Program {
        globals: vec![],
        functions: (0..64).map(|i| loop_chain(&format!("f{}", i), 16)).collect(),
    };

    for parallel in [false, true] {
        let analyzer =
            ProgramAnalyzer::new(AnalysisConfig::default().parallel(parallel)).unwrap();
        group.bench_function(if parallel { "parallel" } else { "sequential" }, |b| {
            b.iter(|| black_box(analyzer.analyze(&program, &[]).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_function_analysis, bench_program_analysis);
criterion_main!(benches);
