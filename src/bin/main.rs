// inky-gallery entry point and main loop
//
// Boot sequence: timer -> hardware -> settings -> catalog -> listing
// Main loop: drain scheduler -> WFI -> translate wake flags -> repeat
//
// The 10ms timer tick samples the front buttons (edge detected, so a
// held button shows its image once) and paces LED blinks. External
// group buttons arrive through their own ISR as test-and-clear flags.
// Group steps are queued above slot presses, so a step and a press
// seen in the same wake apply in that order.

#![no_std]
#![no_main]

use core::cell::RefCell;

use critical_section::Mutex;
use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::time::Duration;
use esp_hal::timer::PeriodicTimer;
use esp_hal::timer::timg::TimerGroup;
use log::{error, info, warn};

use gallery_core::{GROUP_SIZE, GroupStep, Outcome, SlotButton, decode_shift_register};
use inky_gallery::apps::gallery::{self, BootError, PanelRenderer};
use inky_gallery::board::{Board, Epd};
use inky_gallery::drivers::buttons;
use inky_gallery::drivers::strip::StripBuffer;
use inky_gallery::kernel::wake::{self, signal_timer, try_wake};
use inky_gallery::kernel::{Job, Scheduler};
use inky_gallery::ui::{CatalogScreen, MessageScreen};

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

// decoded 800x480 bitmap (48KB) + decoder working set (~30KB) + catalog
const HEAP_SIZE: usize = 256720;

static TIMER0: Mutex<RefCell<Option<PeriodicTimer<'static, esp_hal::Blocking>>>> =
    Mutex::new(RefCell::new(None));

#[esp_hal::handler(priority = esp_hal::interrupt::Priority::Priority1)]
fn timer0_handler() {
    critical_section::with(|cs| {
        if let Some(timer) = TIMER0.borrow_ref_mut(cs).as_mut() {
            timer.clear_interrupt();
        }
    });
    signal_timer();
}

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);
    esp_alloc::heap_allocator!(size: HEAP_SIZE);

    info!("booting...");

    let timg0 = TimerGroup::new(unsafe { peripherals.TIMG0.clone_unchecked() });
    let mut timer0 = PeriodicTimer::new(timg0.timer0);
    critical_section::with(|cs| {
        timer0.set_interrupt_handler(timer0_handler);
        if let Err(e) = timer0.start(Duration::from_millis(wake::TICK_MS as u64)) {
            error!("timer: start failed: {:?}", e);
        }
        timer0.listen();
        TIMER0.borrow_ref_mut(cs).replace(timer0);
    });
    info!("timer initialized.");

    let Board {
        display,
        storage,
        mut front,
        group_buttons,
        mut led,
    } = Board::init(peripherals);
    let mut epd = display.epd;
    let sd = storage.sd;
    let mut delay = Delay::new();
    epd.init(&mut delay);
    let mut strip = StripBuffer::new();
    info!("hardware initialized.");

    let settings = gallery::load_settings(&sd);
    let mut io = group_buttons.io;
    buttons::install(
        &mut io,
        group_buttons.next,
        group_buttons.prev,
        settings.debounce_us,
    );

    let image_dir = settings.image_dir.as_str();
    let catalog = match gallery::load_catalog(&sd, image_dir) {
        Ok(images) => images,
        Err(e) => halt(e, &mut epd, &mut strip, &mut delay),
    };
    let mut viewer = match gallery::build_viewer(catalog) {
        Ok(v) => v,
        Err(e) => halt(e, &mut epd, &mut strip, &mut delay),
    };
    info!("\n{}", viewer.navigator().catalog_table());

    if settings.list_on_boot {
        let screen = CatalogScreen::new(viewer.navigator().catalog(), GROUP_SIZE);
        epd.render_full(&mut strip, &mut delay, |s| {
            let _ = screen.draw(s);
        });
        epd.power_off();
    }

    led.set(true);
    info!(
        "gallery ready: buttons A-E show an image of group {} of {}; red/blue step groups.",
        viewer.navigator().current_group(),
        viewer.navigator().group_count()
    );

    let mut sched = Scheduler::new();
    let mut held: Option<SlotButton> = None;

    loop {
        // drain all pending jobs by priority (high first, FIFO within tier)
        while let Some(job) = sched.pop() {
            match job {
                Job::StepGroup(step) => {
                    let group = viewer.on_group_step(step);
                    if settings.group_blink {
                        let times = group.min(u8::MAX as usize) as u8;
                        if let Err(e) = sched.push_unique(Job::Blink(times)) {
                            warn!("sched: {}", e);
                        }
                    }
                }

                Job::ScanButtons => {
                    let pressed = decode_shift_register(front.read());
                    if pressed != held {
                        held = pressed;
                        if let Some(button) = pressed
                            && let Err(e) = sched.push(Job::ShowSlot(button))
                        {
                            warn!("sched: {}", e);
                        }
                    }
                }

                Job::ShowSlot(button) => {
                    let was_on = led.is_on();
                    led.set(true);
                    let mut renderer = PanelRenderer {
                        epd: &mut epd,
                        sd: &sd,
                        strip: &mut strip,
                        delay: &mut delay,
                        dir: image_dir,
                    };
                    match viewer.on_slot(button.slot(), &mut renderer) {
                        Outcome::Shown { .. } | Outcome::Failed => led.set(false),
                        Outcome::Duplicate | Outcome::NoImage => led.set(was_on),
                    }
                }

                Job::Blink(times) => {
                    led.start_blink(
                        times,
                        wake::ms_to_ticks(settings.blink_ms as u32),
                        wake::uptime_ticks(),
                    );
                }
            }
        }

        // wait for wake event then translate flags into jobs
        let wake = match try_wake() {
            Some(w) => w,
            None => {
                wake::wait_for_interrupt();
                continue;
            }
        };

        if wake.button {
            for step in [GroupStep::Next, GroupStep::Prev] {
                if buttons::take(step)
                    && let Err(e) = sched.push(Job::StepGroup(step))
                {
                    warn!("sched: {}", e);
                }
            }
            log::debug!("group buttons: {} presses", buttons::press_count());
        }

        if wake.timer {
            led.poll(wake::uptime_ticks());
            let _ = sched.push_unique(Job::ScanButtons);
        }
    }
}

// put the boot error on the panel and idle forever
fn halt(err: BootError, epd: &mut Epd, strip: &mut StripBuffer, delay: &mut Delay) -> ! {
    error!("boot: {}", err);
    let screen = MessageScreen::new(err.screen_lines());
    epd.render_full(strip, delay, |s| {
        let _ = screen.draw(s);
    });
    epd.hibernate();
    loop {
        wake::wait_for_interrupt();
    }
}
