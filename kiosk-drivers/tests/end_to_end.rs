//! Full kiosk against simulated hardware
//!
//! The real drivers run against a model of the wiring: a key matrix, an
//! HD44780 that latches on the enable falling edge, and a UART transmit
//! register. Waits are bounded so a broken loop fails instead of hanging.

use std::cell::{Cell, RefCell};

use embedded_hal::delay::DelayNs;
use kiosk_core::config::KioskConfig;
use kiosk_core::state::KioskState;
use kiosk_core::{Command, Kiosk, KioskError};
use kiosk_drivers::display::DisplayTiming;
use kiosk_drivers::{Hd44780, MatrixKeypad, SerialTransmitter};
use kiosk_hal::gpio::{InputPin, OutputBus, OutputPin};
use kiosk_hal::uart::{SerialPort, UartConfig};
use kiosk_hal::wait::{Bounded, WaitTimeout};

// ---------------------------------------------------------------------------
// Display model
// ---------------------------------------------------------------------------

struct Lcd {
    ddram: [u8; 0x80],
    addr: usize,
    bus: u8,
    rs: bool,
    en: bool,
    instructions: Vec<u8>,
}

impl Lcd {
    fn new() -> Self {
        Self {
            ddram: [b' '; 0x80],
            addr: 0,
            bus: 0,
            rs: false,
            en: false,
            instructions: Vec::new(),
        }
    }

    fn latch(&mut self) {
        if self.rs {
            self.ddram[self.addr] = self.bus;
            self.addr = (self.addr + 1) % self.ddram.len();
            return;
        }
        self.instructions.push(self.bus);
        match self.bus {
            0x01 => {
                self.ddram = [b' '; 0x80];
                self.addr = 0;
            }
            b if b & 0x80 != 0 => self.addr = (b & 0x7F) as usize,
            _ => {}
        }
    }

    fn line(&self, row: usize) -> String {
        let start = row * 0x40;
        String::from_utf8_lossy(&self.ddram[start..start + 16])
            .trim_end()
            .to_string()
    }
}

struct LcdBus<'a>(&'a RefCell<Lcd>);

impl OutputBus for LcdBus<'_> {
    fn write(&mut self, byte: u8) {
        self.0.borrow_mut().bus = byte;
    }
}

struct LcdRs<'a>(&'a RefCell<Lcd>);

impl OutputPin for LcdRs<'_> {
    fn set_high(&mut self) {
        self.0.borrow_mut().rs = true;
    }

    fn set_low(&mut self) {
        self.0.borrow_mut().rs = false;
    }
}

struct LcdEn<'a>(&'a RefCell<Lcd>);

impl OutputPin for LcdEn<'_> {
    fn set_high(&mut self) {
        self.0.borrow_mut().en = true;
    }

    fn set_low(&mut self) {
        let mut lcd = self.0.borrow_mut();
        if lcd.en {
            lcd.latch();
        }
        lcd.en = false;
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

// ---------------------------------------------------------------------------
// Keypad model
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Keys {
    rows: Cell<[bool; 4]>,
    pressed: Cell<Option<(usize, usize, u32)>>,
}

impl Keys {
    fn press(&self, row: usize, col: usize, hold_reads: u32) {
        self.pressed.set(Some((row, col, hold_reads)));
    }
}

struct Row<'a>(&'a Keys, usize);

impl OutputPin for Row<'_> {
    fn set_high(&mut self) {
        let mut rows = self.0.rows.get();
        rows[self.1] = true;
        self.0.rows.set(rows);
    }

    fn set_low(&mut self) {
        let mut rows = self.0.rows.get();
        rows[self.1] = false;
        self.0.rows.set(rows);
    }
}

struct Col<'a>(&'a Keys, usize);

impl InputPin for Col<'_> {
    fn is_high(&mut self) -> bool {
        match self.0.pressed.get() {
            Some((row, col, hold)) if col == self.1 && !self.0.rows.get()[row] => {
                if hold == 0 {
                    self.0.pressed.set(None);
                    true
                } else {
                    self.0.pressed.set(Some((row, col, hold - 1)));
                    false
                }
            }
            _ => true,
        }
    }
}

// ---------------------------------------------------------------------------
// UART model
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Uart {
    reload: Option<u8>,
    buffer: Option<u8>,
    complete: bool,
    wire: Vec<u8>,
}

impl SerialPort for Uart {
    fn configure(&mut self, _config: &UartConfig, reload: u8) {
        self.reload = Some(reload);
    }

    fn load(&mut self, byte: u8) {
        self.buffer = Some(byte);
    }

    fn tx_complete(&mut self) -> bool {
        if let Some(byte) = self.buffer.take() {
            self.wire.push(byte);
            self.complete = true;
        }
        self.complete
    }

    fn clear_tx_complete(&mut self) {
        self.complete = false;
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

type TestKiosk<'a> = Kiosk<
    Hd44780<LcdBus<'a>, LcdRs<'a>, LcdEn<'a>, NoDelay>,
    MatrixKeypad<Row<'a>, Col<'a>, Bounded>,
    SerialTransmitter<Uart, Bounded>,
>;

fn build<'a>(lcd: &'a RefCell<Lcd>, keys: &'a Keys, config: &KioskConfig) -> TestKiosk<'a> {
    let display = Hd44780::new(
        LcdBus(lcd),
        LcdRs(lcd),
        LcdEn(lcd),
        NoDelay,
        DisplayTiming::from(&config.display),
    );
    let keypad = MatrixKeypad::new(
        [Row(keys, 0), Row(keys, 1), Row(keys, 2), Row(keys, 3)],
        [Col(keys, 0), Col(keys, 1), Col(keys, 2)],
        Bounded::new(1_000),
    );
    let link = SerialTransmitter::new(
        Uart::default(),
        Bounded::new(10),
        UartConfig::new(config.serial.baudrate, config.serial.crystal_hz),
    );
    Kiosk::new(display, keypad, link, config)
}

fn wire(kiosk: &TestKiosk<'_>) -> String {
    String::from_utf8(kiosk.link().port().wire.clone()).unwrap()
}

#[test]
fn boot_shows_welcome() {
    let lcd = RefCell::new(Lcd::new());
    let keys = Keys::default();
    let mut kiosk = build(&lcd, &keys, &KioskConfig::default());

    kiosk.boot().unwrap();

    let lcd = lcd.borrow();
    assert_eq!(lcd.instructions, [0x38, 0x0C, 0x01, 0x06, 0x80, 0xC0]);
    assert_eq!(lcd.line(0), "KIOSK WELCOMES");
    assert_eq!(lcd.line(1), "TEST YOUR EYE");
    assert_eq!(kiosk.state(), KioskState::Poll);
    assert_eq!(kiosk.link().port().reload, Some(0xFD));
    assert!(wire(&kiosk).is_empty());
}

#[test]
fn press_one_launches_cataract_test_once() {
    let lcd = RefCell::new(Lcd::new());
    let keys = Keys::default();
    let mut kiosk = build(&lcd, &keys, &KioskConfig::default());
    kiosk.boot().unwrap();

    // Idle scans do nothing
    for _ in 0..5 {
        assert_eq!(kiosk.poll().unwrap(), None);
    }
    assert!(wire(&kiosk).is_empty());

    keys.press(0, 0, 25);
    let (key, action) = kiosk.step().unwrap();

    assert_eq!(key.as_u8(), 1);
    assert_eq!(action.command, Command::Cataract);
    assert_eq!(wire(&kiosk), "CMD:CATARACT\n");
    assert_eq!(lcd.borrow().line(0), "CATARACT TEST");
    assert_eq!(lcd.borrow().line(1), "Loading...");

    // Released key is not reported again
    for _ in 0..5 {
        assert_eq!(kiosk.poll().unwrap(), None);
    }
    assert_eq!(wire(&kiosk), "CMD:CATARACT\n");
    assert_eq!(kiosk.state(), KioskState::Poll);
}

#[test]
fn session_of_presses() {
    let lcd = RefCell::new(Lcd::new());
    let keys = Keys::default();
    let mut kiosk = build(&lcd, &keys, &KioskConfig::default());
    kiosk.boot().unwrap();

    keys.press(3, 0, 3); // *
    kiosk.step().unwrap();
    assert_eq!(lcd.borrow().line(0), "MENU SELECTED");
    assert_eq!(lcd.borrow().line(1), "Press 1, 2, or 3");

    keys.press(2, 0, 3); // 7
    kiosk.step().unwrap();
    assert_eq!(lcd.borrow().line(0), "Input: 7");
    assert_eq!(lcd.borrow().line(1), "Error/Debug key.");

    keys.press(3, 2, 3); // #
    kiosk.step().unwrap();
    assert_eq!(lcd.borrow().line(0), "EXIT/RESTART");
    assert_eq!(lcd.borrow().line(1), "KIOSK WELCOMES");

    assert_eq!(wire(&kiosk), "CMD:MENU\nDBG:7\nCMD:RESTART\n");
}

#[test]
fn stuck_key_surfaces_as_keypad_timeout() {
    let lcd = RefCell::new(Lcd::new());
    let keys = Keys::default();
    let mut kiosk = build(&lcd, &keys, &KioskConfig::default());
    kiosk.boot().unwrap();

    keys.press(1, 1, u32::MAX);

    assert!(matches!(
        kiosk.poll(),
        Err(KioskError::Keypad(WaitTimeout))
    ));
    assert!(wire(&kiosk).is_empty());
    // Nothing was dispatched, the greeting is still up
    assert_eq!(lcd.borrow().line(0), "KIOSK WELCOMES");
}

#[test]
fn configured_greeting_and_baud() {
    let config = kiosk_core::config::parse_config(
        "[display]\nwelcome_line1 = \"EYE CHECK\"\nwelcome_line2 = \"PRESS *\"\n\n[serial]\nbaudrate = 4800\n",
    )
    .unwrap();
    let lcd = RefCell::new(Lcd::new());
    let keys = Keys::default();
    let mut kiosk = build(&lcd, &keys, &config);

    kiosk.boot().unwrap();

    assert_eq!(lcd.borrow().line(0), "EYE CHECK");
    assert_eq!(lcd.borrow().line(1), "PRESS *");
    assert_eq!(kiosk.link().port().reload, Some(0xFA));
}
