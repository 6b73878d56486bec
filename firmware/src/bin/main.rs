#![no_std]
#![no_main]

use core::mem::MaybeUninit;

use card_dealer::{
    DealerBridge, Rig, StatusFeedback, StepperMotor, UartEventSource, BLUETOOTH_BAUDRATE,
    HEAP_SIZE,
};
use dealer_core::{DISPENSE_STEPPER, TURN_STEPPER};
use defmt::{info, panic};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_time::Delay;
use embedded_alloc::LlffHeap as Heap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
});

/// Backs the directive decoder's allocations.
#[global_allocator]
static HEAP: Heap = Heap::empty();

/// Seed for the card count RNG, gathered from the ring oscillator's jitter bit.
fn rosc_seed() -> u64 {
    let mut seed = 0u64;
    for _ in 0..64 {
        let bit = embassy_rp::pac::ROSC.randombit().read().randombit();
        seed = (seed << 1) | u64::from(bit);
    }
    seed
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    {
        static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
        // SAFETY: called once, before anything allocates
        unsafe { HEAP.init(&raw mut HEAP_MEM as usize, HEAP_SIZE) }
    }

    info!("Card dealer starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Bluetooth UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BLUETOOTH_BAUDRATE;

    let uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (_tx, rx) = uart.split();
    let link = Input::new(p.PIN_10, Pull::Down);
    let source = UartEventSource::new(rx, link);

    // --- Motion Setup ---
    // Drivers are enabled for as long as the firmware runs
    let _enable = Output::new(p.PIN_6, Level::Low);

    let turn = StepperMotor::new(
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Delay,
        TURN_STEPPER,
    );
    let dispense = StepperMotor::new(
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
        Delay,
        DISPENSE_STEPPER,
    );
    let rig = Rig::new(turn, dispense, Delay);

    // --- Indicators ---
    let feedback = StatusFeedback::new(
        Output::new(p.PIN_14, Level::Low),
        Output::new(p.PIN_15, Level::Low),
        Output::new(p.PIN_16, Level::Low),
        Delay,
    );

    let rng = ChaCha8Rng::seed_from_u64(rosc_seed());

    let mut bridge = DealerBridge::new(source, rig, feedback, rng);
    bridge.start();

    info!("Card dealer initialized, waiting for directives...");

    let fault = bridge.run().await;
    bridge.stop();
    panic!("actuator fault: {:?}", fault);
}
