//! The per-opcode dispatch switch, and the crash/re-queue bookkeeping
//! around it.

use crate::consts::INSTRUCTION_WIDTH;
use crate::error::PanicReason;
use crate::events::EventSink;
use crate::instruction::{AddressingMode, Instruction, Opcode};
use crate::scheduler::Scheduler;
use crate::thread::Thread;

use super::Flow;

impl Scheduler {
    /// Pops one instruction's worth of work for `thread`: scores it,
    /// decodes and dispatches the instruction at its `pc`, then either
    /// re-queues it (continuing or having jumped) or crashes it.
    pub(in crate::scheduler) fn execute(&mut self, mut thread: Thread, sink: &mut impl EventSink) {
        if let Some(player) = self.players.get_mut(thread.owner()) {
            player.bump_score();
        }

        let bytes = self.core.read_range(thread.pc(), INSTRUCTION_WIDTH);
        let decoded = Instruction::decode([bytes[0], bytes[1], bytes[2], bytes[3]]);

        let outcome = match decoded {
            Ok(instr) => self.dispatch(&mut thread, &instr, sink),
            Err(reason) => Err(reason),
        };

        match outcome {
            Ok(Flow::Jumped) => {}
            Ok(Flow::Continue) => {
                let pc = (thread.pc() + INSTRUCTION_WIDTH) % self.core.size();
                thread.set_pc(pc);
                sink.update_thread(thread.id(), thread.pc(), thread.owner());
                self.next_pool.push_back(thread);
            }
            Err(reason) => self.crash(thread, reason, sink),
        }
    }

    fn dispatch(&mut self, thread: &mut Thread, instr: &Instruction, sink: &mut impl EventSink) -> Result<Flow, PanicReason> {
        validate_register_operands(instr)?;

        match instr.opcode() {
            Opcode::Nope => Ok(Flow::Continue),
            Opcode::Yeet => {
                self.mov_template(thread, instr, |a, _b| a, sink)?;
                Ok(Flow::Continue)
            }
            Opcode::Yoink => {
                self.mov_template(thread, instr, |a, b| b + a, sink)?;
                Ok(Flow::Continue)
            }
            Opcode::Sub => {
                self.mov_template(thread, instr, |a, b| b.wrapping_sub(a), sink)?;
                Ok(Flow::Continue)
            }
            Opcode::Mul => {
                self.mov_template(thread, instr, |a, b| b.wrapping_mul(a), sink)?;
                Ok(Flow::Continue)
            }
            Opcode::Div => {
                if self.get_a_int(instr, thread)? == 0 {
                    return Err(PanicReason::DivideByZero);
                }
                self.mov_template(thread, instr, |a, b| b / a, sink)?;
                Ok(Flow::Continue)
            }
            Opcode::Fits => {
                if self.get_a_int(instr, thread)? == 0 {
                    return Err(PanicReason::ModuloByZero);
                }
                self.mov_template(thread, instr, |a, b| b % a, sink)?;
                Ok(Flow::Continue)
            }
            Opcode::Bounce => {
                self.jmp_template(thread, instr, sink)?;
                Ok(Flow::Jumped)
            }
            Opcode::Bouncez => {
                if self.get_a_int(instr, thread)? == 0 {
                    self.jmp_template(thread, instr, sink)?;
                    Ok(Flow::Jumped)
                } else {
                    Ok(Flow::Continue)
                }
            }
            Opcode::Bouncen => {
                if self.get_a_int(instr, thread)? != 0 {
                    self.jmp_template(thread, instr, sink)?;
                    Ok(Flow::Jumped)
                } else {
                    Ok(Flow::Continue)
                }
            }
            Opcode::Bounced => self.bounced_template(thread, instr, sink),
            Opcode::Zoop => {
                self.zoop_template(thread, instr, sink)?;
                Ok(Flow::Continue)
            }
            Opcode::Yeb => {
                self.yeb_template(thread, instr, sink)?;
                Ok(Flow::Continue)
            }
            Opcode::Yeetcall => {
                self.syscall_handler(thread);
                Ok(Flow::Continue)
            }
        }
    }

    fn crash(&mut self, thread: Thread, reason: PanicReason, sink: &mut impl EventSink) {
        if let Some(player) = self.players.get_mut(thread.owner()) {
            player.remove_thread(thread.id());
        }

        sink.kill_thread(thread.id());
        sink.runtime_event(&format!("thread {} crashed: {reason}", thread.id()));
        tracing::debug!(thread = thread.id(), owner = thread.owner(), %reason, "thread crashed");
    }
}

/// A register operand's `number` must select `XD` (`0`) or `DX` (`1`) when
/// its mode is register-direct or register-indirect. Every other mode
/// ignores `number`'s validity as a register.
fn validate_register_operands(instr: &Instruction) -> Result<(), PanicReason> {
    let a_ok = !is_register_mode(instr.a_mode()) || matches!(instr.a_number(), 0 | 1);
    let b_ok = !is_register_mode(instr.b_mode()) || matches!(instr.b_number(), 0 | 1);

    if a_ok && b_ok {
        Ok(())
    } else {
        Err(PanicReason::InvalidRegisterNumber)
    }
}

const fn is_register_mode(mode: AddressingMode) -> bool {
    matches!(mode, AddressingMode::RegisterDirect | AddressingMode::RegisterIndirect)
}

#[cfg(test)]
mod tests {
    use crate::config::ArenaConfig;
    use crate::instruction::{AddressingMode, Instruction, Opcode};
    use crate::player::Player;
    use crate::scheduler::Scheduler;
    use crate::thread::Thread;

    fn scheduler() -> Scheduler {
        let config = ArenaConfig {
            seconds_per_tick: 0.0,
            ..ArenaConfig::default()
        };
        let mut scheduler = Scheduler::new(config);
        scheduler.add_player(Player::new(0, "p", "tok", "#fff"));
        scheduler
    }

    fn place(scheduler: &mut Scheduler, addr: usize, instr: Instruction) {
        scheduler.core_mut().write_bytes(addr, &instr.encode(), 0, &mut ());
    }

    #[test]
    fn yeet_copies_a_into_b() {
        let mut scheduler = scheduler();
        place(
            &mut scheduler,
            0,
            Instruction::new(Opcode::Yeet, AddressingMode::Relative, 8, AddressingMode::Relative, 20),
        );
        scheduler.core_mut().write_word(8, 0xCAFE_BABE, 0, &mut ());
        scheduler.spawn_new_thread(Thread::new(0, 0, 0), &mut ());

        scheduler.step(&mut ());

        assert_eq!(scheduler.core().read_word(20), 0xCAFE_BABE);
    }

    #[test]
    fn divide_by_zero_crashes_the_thread() {
        let mut scheduler = scheduler();
        place(
            &mut scheduler,
            0,
            Instruction::new(Opcode::Div, AddressingMode::Immediate, 0, AddressingMode::Relative, 4),
        );
        scheduler.spawn_new_thread(Thread::new(0, 0, 0), &mut ());

        scheduler.step(&mut ());

        assert_eq!(scheduler.live_thread_count(), 0);
        assert_eq!(scheduler.players().get(0).unwrap().thread_count(), 0);
    }

    #[test]
    fn invalid_register_number_crashes_the_thread() {
        let mut scheduler = scheduler();
        place(
            &mut scheduler,
            0,
            Instruction::new(Opcode::Yeet, AddressingMode::RegisterDirect, 5, AddressingMode::Relative, 4),
        );
        scheduler.spawn_new_thread(Thread::new(0, 0, 0), &mut ());

        scheduler.step(&mut ());

        assert_eq!(scheduler.live_thread_count(), 0);
    }

    #[test]
    fn bounce_jumps_to_the_resolved_address() {
        let mut scheduler = scheduler();
        place(
            &mut scheduler,
            0,
            Instruction::new(Opcode::Bounce, AddressingMode::Immediate, 0, AddressingMode::Immediate, 40),
        );
        scheduler.spawn_new_thread(Thread::new(0, 0, 0), &mut ());

        // First step executes the BOUNCE and re-queues the thread onto `next`
        // at pc=40; second step swaps pools in (current is now dry).
        scheduler.step(&mut ());
        assert_eq!(scheduler.tick_count(), 0);
        scheduler.step(&mut ());
        assert_eq!(scheduler.tick_count(), 1);
    }

    #[test]
    fn successful_step_bumps_score_even_if_it_later_crashes() {
        let mut scheduler = scheduler();
        place(
            &mut scheduler,
            0,
            Instruction::new(Opcode::Div, AddressingMode::Immediate, 0, AddressingMode::Relative, 4),
        );
        scheduler.spawn_new_thread(Thread::new(0, 0, 0), &mut ());

        scheduler.step(&mut ());

        assert_eq!(scheduler.players().get(0).unwrap().score(), 1);
    }
}
