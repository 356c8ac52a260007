/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2024 Tendsin Mende
 */

//! Mutating operations on a [Module]. All of them keep the operand and user lists in sync.

use crate::{
    err::GraphError, Block, BlockRef, FuncRef, Function, InstKind, InstRef, Instruction, Module,
    SmallColl, Span,
};

impl Module {
    ///Adds a new function without body. Use [Self::append_block] to turn it into a definition.
    pub fn add_function(&mut self, name: impl Into<String>) -> FuncRef {
        self.functions.insert(Function::new(name))
    }

    pub fn append_block(&mut self, f: FuncRef) -> Result<BlockRef, GraphError> {
        if !self.functions.contains_key(f) {
            return Err(GraphError::InvalidFunction(f));
        }
        let block = self.blocks.insert(Block {
            function: f,
            insts: Vec::new(),
        });
        self.functions[f].blocks.push(block);
        Ok(block)
    }

    ///Appends a new instruction at the end of `block`.
    pub fn append_inst(
        &mut self,
        block: BlockRef,
        kind: InstKind,
        operands: &[InstRef],
    ) -> Result<InstRef, GraphError> {
        let at = self
            .blocks
            .get(block)
            .ok_or(GraphError::InvalidBlock(block))?
            .insts
            .len();
        self.insert_inst_at(block, at, kind, operands)
    }

    ///Inserts a new instruction right before `anchor`, in `anchor`'s block.
    pub fn insert_inst_before(
        &mut self,
        anchor: InstRef,
        kind: InstKind,
        operands: &[InstRef],
    ) -> Result<InstRef, GraphError> {
        let block = self
            .insts
            .get(anchor)
            .ok_or(GraphError::InvalidInst(anchor))?
            .block;
        let at = self.blocks[block]
            .insts
            .iter()
            .position(|i| *i == anchor)
            .ok_or(GraphError::InvalidInst(anchor))?;
        self.insert_inst_at(block, at, kind, operands)
    }

    fn insert_inst_at(
        &mut self,
        block: BlockRef,
        at: usize,
        kind: InstKind,
        operands: &[InstRef],
    ) -> Result<InstRef, GraphError> {
        if !self.blocks.contains_key(block) {
            return Err(GraphError::InvalidBlock(block));
        }
        if let Some(invalid) = operands.iter().find(|op| !self.insts.contains_key(**op)) {
            return Err(GraphError::InvalidInst(*invalid));
        }

        let inst = self.insts.insert(Instruction {
            kind,
            span: None,
            block,
            operands: operands.iter().cloned().collect(),
            users: SmallColl::new(),
        });
        for op in operands {
            self.insts[*op].users.push(inst);
        }
        self.blocks[block].insts.insert(at, inst);
        Ok(inst)
    }

    pub fn set_span(&mut self, inst: InstRef, span: Span) -> Result<(), GraphError> {
        self.insts
            .get_mut(inst)
            .ok_or(GraphError::InvalidInst(inst))?
            .span = Some(span);
        Ok(())
    }

    ///Rewrites every use of `old` to use `new` instead. Afterwards `old` has no users.
    pub fn replace_all_uses_with(&mut self, old: InstRef, new: InstRef) -> Result<(), GraphError> {
        if !self.insts.contains_key(new) {
            return Err(GraphError::InvalidInst(new));
        }
        if old == new {
            return Ok(());
        }
        let mut users = std::mem::take(
            &mut self
                .insts
                .get_mut(old)
                .ok_or(GraphError::InvalidInst(old))?
                .users,
        );
        users.sort_unstable();
        users.dedup();

        for user in users {
            let mut replaced = 0;
            for op in self.insts[user].operands.iter_mut() {
                if *op == old {
                    *op = new;
                    replaced += 1;
                }
            }
            for _ in 0..replaced {
                self.insts[new].users.push(user);
            }
        }

        Ok(())
    }

    ///Removes `inst` from its block and the module. Fails if the instruction is still used.
    ///
    /// The instruction is also removed from the user-list of each of its operands.
    pub fn remove_inst(&mut self, inst: InstRef) -> Result<Instruction, GraphError> {
        let uses = self
            .insts
            .get(inst)
            .ok_or(GraphError::InvalidInst(inst))?
            .users
            .len();
        if uses > 0 {
            return Err(GraphError::InstHasUses { inst, uses });
        }

        let removed = self
            .insts
            .remove(inst)
            .ok_or(GraphError::InvalidInst(inst))?;
        if let Some(block) = self.blocks.get_mut(removed.block) {
            block.insts.retain(|i| *i != inst);
        }
        for op in removed.operands.iter() {
            if let Some(producer) = self.insts.get_mut(*op) {
                if let Some(pos) = producer.users.iter().position(|u| *u == inst) {
                    producer.users.remove(pos);
                }
            }
        }

        Ok(removed)
    }
}
