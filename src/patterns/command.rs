//! Command: a toggle button invoking on/off commands against a shared TV.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use tracing::debug;

use crate::error::Result;

pub trait Device {
    fn on(&mut self);
    fn off(&mut self);
    fn is_running(&self) -> bool;
}

#[derive(Debug, Default)]
pub struct Tv {
    running: bool,
}

impl Device for Tv {
    fn on(&mut self) {
        self.running = true;
    }

    fn off(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

pub type SharedDevice = Rc<RefCell<dyn Device>>;

pub trait Command {
    fn execute(&self);
}

pub struct OnCommand {
    device: SharedDevice,
}

impl OnCommand {
    pub fn new(device: SharedDevice) -> Self {
        Self { device }
    }
}

impl Command for OnCommand {
    fn execute(&self) {
        self.device.borrow_mut().on();
    }
}

pub struct OffCommand {
    device: SharedDevice,
}

impl OffCommand {
    pub fn new(device: SharedDevice) -> Self {
        Self { device }
    }
}

impl Command for OffCommand {
    fn execute(&self) {
        self.device.borrow_mut().off();
    }
}

/// Invoker holding the command the next press will run.
pub struct Button {
    command: Rc<dyn Command>,
}

impl Button {
    pub fn new(command: Rc<dyn Command>) -> Self {
        Self { command }
    }

    pub fn set_command(&mut self, command: Rc<dyn Command>) {
        self.command = command;
    }

    pub fn current(&self) -> &Rc<dyn Command> {
        &self.command
    }

    /// Runs the current command, then swaps to the other one.
    ///
    /// Commands carry no distinguishing data, so the swap compares
    /// allocations rather than values.
    pub fn press(&mut self, on: &Rc<dyn Command>, off: &Rc<dyn Command>) {
        self.command.execute();
        if Rc::ptr_eq(&self.command, on) {
            debug!("button toggled to the off command");
            self.set_command(Rc::clone(off));
        } else if Rc::ptr_eq(&self.command, off) {
            debug!("button toggled to the on command");
            self.set_command(Rc::clone(on));
        }
    }
}

pub fn demo<W: Write>(out: &mut W, presses: u32) -> Result<()> {
    let tv = Rc::new(RefCell::new(Tv::default()));
    let device: SharedDevice = tv.clone();
    let on: Rc<dyn Command> = Rc::new(OnCommand::new(device.clone()));
    let off: Rc<dyn Command> = Rc::new(OffCommand::new(device));

    let mut button = Button::new(Rc::clone(&on));
    for press in 1..=presses {
        button.press(&on, &off);
        let status = if tv.borrow().is_running() { "on" } else { "off" };
        writeln!(out, "{press} TV is {status}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wired() -> (Rc<RefCell<Tv>>, Rc<dyn Command>, Rc<dyn Command>) {
        let tv = Rc::new(RefCell::new(Tv::default()));
        let device: SharedDevice = tv.clone();
        let on: Rc<dyn Command> = Rc::new(OnCommand::new(device.clone()));
        let off: Rc<dyn Command> = Rc::new(OffCommand::new(device));
        (tv, on, off)
    }

    #[test]
    fn test_ten_presses_alternate() {
        let (tv, on, off) = wired();
        let mut button = Button::new(Rc::clone(&on));

        for press in 1..=10 {
            button.press(&on, &off);
            assert_eq!(tv.borrow().is_running(), press % 2 == 1, "press {press}");
        }
    }

    #[test]
    fn test_toggle_uses_identity() {
        let (_tv, on, off) = wired();
        let mut button = Button::new(Rc::clone(&on));
        button.press(&on, &off);
        assert!(Rc::ptr_eq(button.current(), &off));
        button.press(&on, &off);
        assert!(Rc::ptr_eq(button.current(), &on));
    }

    #[test]
    fn test_foreign_command_is_not_swapped() {
        let (tv, on, off) = wired();
        let device: SharedDevice = tv.clone();
        let stranger: Rc<dyn Command> = Rc::new(OnCommand::new(device));
        let mut button = Button::new(Rc::clone(&stranger));

        button.press(&on, &off);
        assert!(tv.borrow().is_running());
        assert!(Rc::ptr_eq(button.current(), &stranger));
    }

    #[test]
    fn test_demo_output() {
        let mut out = Vec::new();
        demo(&mut out, 4).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "1 TV is on\n2 TV is off\n3 TV is on\n4 TV is off\n");
    }
}
