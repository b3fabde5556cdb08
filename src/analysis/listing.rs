//! Linear-sweep disassembly listings.

use crate::analysis::{InstructionRecord, Result};
use crate::arch::{ArchName, Registry};
use crate::ast::Operand;
use crate::memory::MemoryPort;
use std::collections::BTreeSet;

/// One decoded instruction of a listing.
#[derive(Clone, Debug)]
pub struct ListingLine {
    pub address: u32,
    pub record: InstructionRecord,
}

/// The result of sweeping linearly through memory.
#[derive(Clone, Debug)]
pub struct Listing {
    lines: Vec<ListingLine>,
    end: u32,
    flags: u8,
    terminated: bool,
}

impl Listing {
    pub fn lines(&self) -> &[ListingLine] {
        &self.lines
    }

    /// Address just past the last decoded instruction.
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Processor flags in effect after the last decoded instruction.
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Determine if the sweep stopped because an instruction ended the run,
    /// rather than because it hit the instruction limit.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Collect the code addresses that jumps within the listing refer to.
    ///
    /// Only statically encoded targets are found; register-indirect jumps
    /// contribute nothing.
    pub fn jump_targets(&self) -> Result<BTreeSet<u32>> {
        let mut targets = BTreeSet::new();

        for line in &self.lines {
            if !line.record.is_jump()? && !line.record.is_jump_to_sub()? {
                continue;
            }

            for operand in line.record.disassemble(line.address)?.iter_operands() {
                collect_code_references(operand, &mut targets);
            }
        }

        Ok(targets)
    }
}

fn collect_code_references(operand: &Operand, targets: &mut BTreeSet<u32>) {
    match operand {
        Operand::CodeReference(_) => {
            if let Some(address) = operand.referenced_address() {
                targets.insert(address);
            }
        }
        Operand::Infix(op1, _, op2) => {
            collect_code_references(op1, targets);
            collect_code_references(op2, targets);
        }
        Operand::PrefixSymbol(_, op) | Operand::SuffixSymbol(op, _) => {
            collect_code_references(op, targets)
        }
        Operand::WrapperSymbol(_, ops, _) | Operand::Concat(ops) => {
            for op in ops {
                collect_code_references(op, targets);
            }
        }
        Operand::Symbol(_) | Operand::Literal(_) | Operand::DataReference(_) => {}
    }
}

/// Decode instructions one after another starting at `start`.
///
/// The processor flags are threaded from one instruction to the next with
/// `update_flags`, so width-changing instructions decode correctly. The sweep
/// stops after the first instruction that cannot be continued past, or after
/// `limit` instructions.
pub fn disassemble_block(
    registry: &Registry,
    arch: ArchName,
    start: u32,
    flags: u8,
    port: &dyn MemoryPort,
    limit: usize,
) -> Result<Listing> {
    let mut lines = Vec::new();
    let mut pc = start;
    let mut flags = flags;
    let mut terminated = false;

    while lines.len() < limit {
        let mut record = InstructionRecord::new();
        record.initialize_with(registry, pc, flags, arch, port)?;
        record.update_flags(&mut flags)?;

        let next_pc = arch.next_address(pc, record.length()?);
        let is_final = !record.can_continue()?;

        lines.push(ListingLine {
            address: pc,
            record,
        });
        pc = next_pc;

        if is_final {
            terminated = true;
            break;
        }
    }

    Ok(Listing {
        lines,
        end: pc,
        flags,
        terminated,
    })
}
