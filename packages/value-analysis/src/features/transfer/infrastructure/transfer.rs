//! Per-node transfer function.
//!
//! Maps the entry state of a node to the states handed to each of its
//! successors. Total: every instruction, including ones over unknown or
//! unreachable operands, has a defined result.

use tracing::trace;

use super::addressing::eval_addressing;
use super::builtins::transfer_builtin;
use crate::config::AnalysisConfig;
use crate::features::fiber::Fiber;
use crate::features::memory_domain::{call_result, classify_call, AbstractMemoryState};
use crate::features::readonly_globals::ReadOnlyGlobals;
use crate::features::transfer::domain::{NodeState, RegisterFile};
use crate::features::transfer::ports::{ControlFlowGraph, LivenessOracle};
use crate::features::value_domain::{eval_condition, eval_operation};
use crate::shared::models::{Instruction, NodeId};

pub struct TransferFunction<'a, G: ?Sized, V: ?Sized> {
    graph: &'a G,
    liveness: &'a V,
    romem: &'a ReadOnlyGlobals,
    config: &'a AnalysisConfig,
}

impl<'a, G, V> TransferFunction<'a, G, V>
where
    G: ControlFlowGraph + ?Sized,
    V: LivenessOracle + ?Sized,
{
    pub fn new(graph: &'a G, liveness: &'a V, romem: &'a ReadOnlyGlobals, config: &'a AnalysisConfig) -> Self {
        Self {
            graph,
            liveness,
            romem,
            config,
        }
    }

    pub fn transfer(&self, node: NodeId, state: &NodeState) -> Fiber<NodeState> {
        let NodeState::Live { regs, mem } = state else {
            return Fiber::empty();
        };
        let Some(instr) = self.graph.instruction_at(node) else {
            trace!(node = %node, "no instruction, treating as unreachable");
            return Fiber::empty();
        };

        let fiber = self.step(instr, regs, mem);

        if !self.config.liveness_trim {
            return fiber;
        }
        match self.liveness.registers_dead_after(node) {
            Some(dead) if !dead.is_empty() => fiber.map(|_, s| s.without(dead)),
            _ => fiber,
        }
    }

    fn step(&self, instr: &Instruction, regs: &RegisterFile, mem: &AbstractMemoryState) -> Fiber<NodeState> {
        let same = || NodeState::live(regs.clone(), mem.clone());
        match instr {
            Instruction::Nop { succ } => Fiber::single(*succ, same()),

            Instruction::Op { op, args, dest, succ } => {
                let value = eval_operation(op, &regs.get_all(args));
                let mut out = regs.clone();
                out.set(*dest, value);
                Fiber::single(*succ, NodeState::live(out, mem.clone()))
            }

            Instruction::Load { chunk, addr, args, dest, succ } => {
                let address = eval_addressing(addr, &regs.get_all(args));
                let value = mem.load(*chunk, address.address_class(), self.romem);
                let mut out = regs.clone();
                out.set(*dest, value);
                Fiber::single(*succ, NodeState::live(out, mem.clone()))
            }

            Instruction::Store { chunk, addr, args, src, succ } => {
                let address = eval_addressing(addr, &regs.get_all(args));
                let mut out = mem.clone();
                out.store(*chunk, address.address_class(), regs.get(*src));
                Fiber::single(*succ, NodeState::live(regs.clone(), out))
            }

            Instruction::Call { args, dest, succ, .. } => {
                let kind = classify_call(&regs.get_all(args), mem);
                let mut out = regs.clone();
                out.set(*dest, call_result(kind));
                Fiber::single(*succ, NodeState::live(out, mem.after_call(kind)))
            }

            Instruction::TailCall { .. } | Instruction::Return { .. } => Fiber::empty(),

            Instruction::Builtin { builtin, args, dest, succ } => {
                let (regs_out, mem_out) = transfer_builtin(
                    builtin,
                    args,
                    *dest,
                    regs,
                    mem,
                    self.romem,
                    &self.config.builtins,
                );
                Fiber::single(*succ, NodeState::live(regs_out, mem_out))
            }

            Instruction::Cond { cond, args, ifso, ifnot } => {
                let outcome = eval_condition(cond, &regs.get_all(args));
                let mut fiber = Fiber::empty();
                if outcome.may_be_true() {
                    fiber.add(*ifso, same());
                }
                if outcome.may_be_false() {
                    fiber.add(*ifnot, same());
                }
                fiber
            }

            Instruction::JumpTable { targets, .. } => {
                let mut fiber = Fiber::empty();
                for target in targets {
                    fiber.add_first(*target, same());
                }
                fiber
            }
        }
    }
}
