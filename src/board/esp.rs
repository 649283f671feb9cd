//! ESP32-S3 board.
//!
//! ```text
//! esp_timer 1 ms ──▶ Clock::on_tick
//! esp_timer 5 ms ──▶ sample S1..S4 → Debouncer → DebouncedLevel
//!                └─▶ Multiplexer → SPI 74HC595 (one digit per tick)
//! UART0 RX thread ─▶ SerialPort::on_byte
//! main loop ───────▶ Game::tick (LEDC buzzer, ADC knob, DisplayFrame)
//! ```

use core::fmt;
use core::time::Duration;

use esp_idf_svc::hal::adc::attenuation::DB_11;
use esp_idf_svc::hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_svc::hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_svc::hal::adc::ADC1;
use esp_idf_svc::hal::delay::{FreeRtos, BLOCK};
use esp_idf_svc::hal::gpio::{AnyIOPin, AnyOutputPin, Gpio1, Input, PinDriver, Pull};
use esp_idf_svc::hal::ledc::config::TimerConfig;
use esp_idf_svc::hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::spi::config::Config as SpiConfig;
use esp_idf_svc::hal::spi::{SpiDeviceDriver, SpiDriver, SpiDriverConfig};
use esp_idf_svc::hal::uart::config::Config as UartConfig;
use esp_idf_svc::hal::uart::{UartDriver, UartTxDriver};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::{self, esp, EspError};
use esp_idf_svc::timer::{EspTaskTimerService, EspTimer};

use simon_game::debounce::Debouncer;
use simon_game::hal::gpio::{ButtonPins, BuzzerConfig, DisplayConfig};
use simon_game::hal::{Buzzer, DelayKnob, Display, Frame, Multiplexer};
use simon_game::{simon_info, simon_warn, SerialPort, Shared, CONFIG};

pub type Error = EspError;

/// Blocking UART console.
pub struct Console {
    tx: UartTxDriver<'static>,
}

impl fmt::Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.tx.write(s.as_bytes()).map(|_| ()).map_err(|_| fmt::Error)
    }
}

pub struct EspBoard {
    shared: &'static Shared,
    buzzer: LedcDriver<'static>,
    tone_duty: u32,
    knob: AdcChannelDriver<'static, Gpio1, AdcDriver<'static, ADC1>>,
    last_reading: u8,
}

impl Display for EspBoard {
    fn show(&mut self, frame: Frame) {
        self.shared.display.publish(frame);
    }
}

impl Buzzer for EspBoard {
    fn play_tone(&mut self, frequency_hz: u16) {
        // The timer is shared by the one channel, retune it in place.
        let result = esp!(unsafe {
            sys::ledc_set_freq(
                sys::ledc_mode_t_LEDC_LOW_SPEED_MODE,
                sys::ledc_timer_t_LEDC_TIMER_0,
                frequency_hz as u32,
            )
        })
        .and_then(|_| self.buzzer.set_duty(self.tone_duty));

        if let Err(e) = result {
            simon_warn!(self.shared.task_log, self.shared.now_ms(), "buzzer {} Hz: {}", frequency_hz, e);
        }
    }

    fn stop_tone(&mut self) {
        if let Err(e) = self.buzzer.set_duty(0) {
            simon_warn!(self.shared.task_log, self.shared.now_ms(), "buzzer off: {}", e);
        }
    }
}

impl DelayKnob for EspBoard {
    fn reading(&mut self) -> u8 {
        match self.knob.read() {
            // 12-bit conversion, keep the top 8 bits
            Ok(raw) => self.last_reading = (raw >> 4).min(255) as u8,
            Err(e) => simon_warn!(self.shared.task_log, self.shared.now_ms(), "adc: {}", e),
        }
        self.last_reading
    }
}

/// Everything that must stay alive while the game runs.
pub struct Hardware {
    pub board: EspBoard,
    pub console: Console,
    _clock: EspTimer<'static>,
    _scan: EspTimer<'static>,
}

impl Hardware {
    /// Sink for drained log lines (same UART as the console).
    pub fn log_sink(&mut self) -> &mut dyn fmt::Write {
        &mut self.console
    }
}

/// Bring up peripherals and start the timer and RX contexts.
pub fn start(shared: &'static Shared) -> Result<Hardware, EspError> {
    sys::link_patches();

    let peripherals = Peripherals::take()?;
    let timers = EspTaskTimerService::new()?;

    // Clock
    let clock = timers.timer(move || shared.clock.on_tick())?;
    clock.every(Duration::from_millis(CONFIG.tick_ms as u64))?;

    // Buttons and display, both on the 5 ms scan
    let button_pins = ButtonPins::default();
    let mut buttons = [
        input_pin(button_pins.pins[0])?,
        input_pin(button_pins.pins[1])?,
        input_pin(button_pins.pins[2])?,
        input_pin(button_pins.pins[3])?,
    ];

    let display = DisplayConfig::default();
    // SAFETY: display pins are not handed out anywhere else.
    let (sclk, mosi, latch) = unsafe {
        (
            AnyIOPin::new(display.sclk),
            AnyIOPin::new(display.mosi),
            AnyIOPin::new(display.latch),
        )
    };
    let spi = SpiDriver::new(
        peripherals.spi2,
        sclk,
        mosi,
        Option::<AnyIOPin>::None,
        &SpiDriverConfig::new(),
    )?;
    let mut shift_register = SpiDeviceDriver::new(
        spi,
        Some(latch),
        &SpiConfig::new().baudrate(Hertz(display.baudrate_hz)),
    )?;

    let mut debouncer = Debouncer::new();
    let mut mux = Multiplexer::new();
    let scan = timers.timer(move || {
        let mut raw = 0u8;
        for (i, pin) in buttons.iter_mut().enumerate() {
            if pin.is_high() {
                raw |= 1 << i;
            }
        }
        shared.buttons.publish(debouncer.sample(raw));

        // isr_log belongs to the RX thread. A failed write only loses this
        // digit until its next turn.
        let byte = mux.next_byte(&shared.display);
        let _ = shift_register.write(&[byte]);
    })?;
    scan.every(Duration::from_millis(CONFIG.debounce_tick_ms as u64))?;

    // Buzzer
    let buzzer_cfg = BuzzerConfig::default();
    let ledc_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::default()
            .frequency(Hertz(324))
            .resolution(Resolution::Bits10),
    )?;
    // SAFETY: buzzer pin is not handed out anywhere else.
    let buzzer_pin = unsafe { AnyOutputPin::new(buzzer_cfg.pin) };
    let mut buzzer = LedcDriver::new(peripherals.ledc.channel0, ledc_timer, buzzer_pin)?;
    let tone_duty = buzzer.get_max_duty() * buzzer_cfg.duty_percent as u32 / 100;
    buzzer.set_duty(0)?;

    // Knob
    let adc = AdcDriver::new(peripherals.adc1)?;
    let adc_config = AdcChannelConfig {
        attenuation: DB_11,
        ..Default::default()
    };
    let knob = AdcChannelDriver::new(adc, peripherals.pins.gpio1, &adc_config)?;

    // Console
    let uart = UartDriver::new(
        peripherals.uart0,
        peripherals.pins.gpio43,
        peripherals.pins.gpio44,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &UartConfig::default().baudrate(Hertz(CONFIG.baud_rate)),
    )?;
    let (tx, rx) = uart.into_split();

    std::thread::Builder::new()
        .name("serial-rx".into())
        .stack_size(4096)
        .spawn(move || {
            let mut port = SerialPort::new();
            let mut buf = [0u8; 16];
            loop {
                match rx.read(&mut buf, BLOCK) {
                    Ok(n) => {
                        for &b in &buf[..n] {
                            port.on_byte(b, shared);
                        }
                    }
                    Err(e) => simon_warn!(shared.isr_log, shared.now_ms(), "uart rx: {}", e),
                }
            }
        })
        .map_err(|_| EspError::from_infallible::<{ sys::ESP_ERR_NO_MEM as i32 }>())?;

    simon_info!(shared.task_log, shared.now_ms(), "board up");

    Ok(Hardware {
        board: EspBoard {
            shared,
            buzzer,
            tone_duty,
            knob,
            last_reading: 128,
        },
        console: Console { tx },
        _clock: clock,
        _scan: scan,
    })
}

fn input_pin(pin: i32) -> Result<PinDriver<'static, AnyIOPin, Input>, EspError> {
    // SAFETY: each button pin is claimed exactly once, here.
    let mut driver = PinDriver::input(unsafe { AnyIOPin::new(pin) })?;
    driver.set_pull(Pull::Up)?;
    Ok(driver)
}

/// Yield between polls.
pub fn idle() {
    FreeRtos::delay_ms(1);
}
