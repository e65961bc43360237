//! Instruction and analysis builders
//!
//! Short constructors for the instructions the tests wire into functions.

use value_analysis::config::AnalysisConfig;
use value_analysis::shared::models::{
    Addressing, BinaryOp, Callee, Chunk, Comparison, Condition, Function, GlobalDef, Instruction,
    NodeId, Operation, Reg, Symbol,
};
use value_analysis::{
    build_readonly_globals, FunctionAnalysis, FunctionAnalyzer, NoLiveness, ReadOnlyGlobals,
};

pub fn int_const(dest: u32, n: i32, succ: u32) -> Instruction {
    Instruction::Op {
        op: Operation::IntConst(n),
        args: vec![],
        dest: Reg(dest),
        succ: NodeId(succ),
    }
}

pub fn binary(op: BinaryOp, dest: u32, a: u32, b: u32, succ: u32) -> Instruction {
    Instruction::Op {
        op: Operation::Binary(op),
        args: vec![Reg(a), Reg(b)],
        dest: Reg(dest),
        succ: NodeId(succ),
    }
}

pub fn op(op: Operation, args: &[u32], dest: u32, succ: u32) -> Instruction {
    Instruction::Op {
        op,
        args: args.iter().copied().map(Reg).collect(),
        dest: Reg(dest),
        succ: NodeId(succ),
    }
}

pub fn addr_stack(dest: u32, ofs: i64, succ: u32) -> Instruction {
    op(Operation::AddrStack(ofs), &[], dest, succ)
}

pub fn store_stack(chunk: Chunk, ofs: i64, src: u32, succ: u32) -> Instruction {
    Instruction::Store {
        chunk,
        addr: Addressing::Stack(ofs),
        args: vec![],
        src: Reg(src),
        succ: NodeId(succ),
    }
}

pub fn store_through(chunk: Chunk, base: u32, ofs: i64, src: u32, succ: u32) -> Instruction {
    Instruction::Store {
        chunk,
        addr: Addressing::Indexed(ofs),
        args: vec![Reg(base)],
        src: Reg(src),
        succ: NodeId(succ),
    }
}

pub fn load_stack(chunk: Chunk, ofs: i64, dest: u32, succ: u32) -> Instruction {
    Instruction::Load {
        chunk,
        addr: Addressing::Stack(ofs),
        args: vec![],
        dest: Reg(dest),
        succ: NodeId(succ),
    }
}

pub fn load_global(chunk: Chunk, symbol: u32, ofs: i64, dest: u32, succ: u32) -> Instruction {
    Instruction::Load {
        chunk,
        addr: Addressing::Global(Symbol(symbol), ofs),
        args: vec![],
        dest: Reg(dest),
        succ: NodeId(succ),
    }
}

pub fn cond_imm(cmp: Comparison, reg: u32, imm: i32, ifso: u32, ifnot: u32) -> Instruction {
    Instruction::Cond {
        cond: Condition::CmpImm(cmp, imm),
        args: vec![Reg(reg)],
        ifso: NodeId(ifso),
        ifnot: NodeId(ifnot),
    }
}

pub fn call(callee: u32, args: &[u32], dest: u32, succ: u32) -> Instruction {
    Instruction::Call {
        callee: Callee::Direct(Symbol(callee)),
        args: args.iter().copied().map(Reg).collect(),
        dest: Reg(dest),
        succ: NodeId(succ),
    }
}

pub fn ret() -> Instruction {
    Instruction::Return { arg: None }
}

/// Analyse with the default configuration, no globals, no liveness
pub fn analyze(f: &Function) -> FunctionAnalysis {
    analyze_with(f, &[], &AnalysisConfig::default()).0
}

pub fn analyze_with(
    f: &Function,
    globals: &[GlobalDef],
    config: &AnalysisConfig,
) -> (FunctionAnalysis, ReadOnlyGlobals) {
    let romem = build_readonly_globals(globals, &config.readonly).expect("globals");
    let analysis = FunctionAnalyzer::new(&romem, config)
        .analyze(f, &NoLiveness)
        .expect("analysis");
    (analysis, romem)
}
