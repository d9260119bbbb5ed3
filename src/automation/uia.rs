/// Windows UI Automation (UIA) backend.
///
/// Implements the capability traits over the live accessibility tree, with
/// pointer input synthesized through `enigo`. On non-Windows platforms only
/// the entry point exists and it reports that the backend is unavailable.
use std::path::Path;

use crate::config::AppConfig;
use crate::engine::types::{Configuration, RunReport};
use crate::errors::AutoconfResult;

// ── Windows implementation ──────────────────────────────────────────────────

#[cfg(target_os = "windows")]
mod win {
    use std::os::windows::io::AsRawHandle;
    use std::path::Path;
    use std::process::{Child, Command};
    use std::time::{Duration, Instant};

    use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
    use windows::Win32::Foundation::{BOOL, HANDLE, POINT, RECT};
    use windows::Win32::System::Com::{
        CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL, COINIT_MULTITHREADED,
    };
    use windows::Win32::UI::Accessibility::{
        CUIAutomation, IUIAutomation, IUIAutomationElement, IUIAutomationInvokePattern,
        IUIAutomationTogglePattern, IUIAutomationTreeWalker, ToggleState_On,
        UIA_ButtonControlTypeId, UIA_InvokePatternId, UIA_TogglePatternId,
    };
    use windows::Win32::UI::WindowsAndMessaging::WaitForInputIdle;

    use crate::automation::{Desktop, Element, Pointer, Window};
    use crate::config::TimingConfig;
    use crate::engine::types::{Point, Rect};
    use crate::errors::{AutoconfError, AutoconfResult};

    const WAIT_TIMEOUT: u32 = 258;

    /// Radeon Settings nests its controls deeply but not unboundedly.
    const MAX_DEPTH: u32 = 64;

    fn uia_err(what: &str, e: windows::core::Error) -> AutoconfError {
        AutoconfError::Automation(format!("{what}: {e}"))
    }

    /// RAII guard for COM initialization on the current thread.
    struct ComGuard;
    impl ComGuard {
        fn new() -> AutoconfResult<Self> {
            unsafe {
                CoInitializeEx(None, COINIT_MULTITHREADED)
                    .ok()
                    .map_err(|e| uia_err("CoInitializeEx", e))?;
            }
            Ok(Self)
        }
    }
    impl Drop for ComGuard {
        fn drop(&mut self) {
            unsafe { CoUninitialize() };
        }
    }

    /// Every element below `element`, depth first, in sibling order.
    fn walk_tree(
        walker: &IUIAutomationTreeWalker,
        element: &IUIAutomationElement,
        depth: u32,
        out: &mut Vec<IUIAutomationElement>,
    ) {
        if depth > MAX_DEPTH {
            return;
        }
        let Ok(mut child) = (unsafe { walker.GetFirstChildElement(element) }) else {
            return;
        };
        loop {
            out.push(child.clone());
            walk_tree(walker, &child, depth + 1, out);
            match unsafe { walker.GetNextSiblingElement(&child) } {
                Ok(next) => child = next,
                Err(_) => break,
            }
        }
    }

    fn element_name(element: &IUIAutomationElement) -> String {
        unsafe { element.CurrentName() }
            .map(|name| name.to_string())
            .unwrap_or_default()
    }

    // Field order matters: interfaces are released before COM is torn down.
    pub struct UiaDesktop {
        automation: IUIAutomation,
        walker: IUIAutomationTreeWalker,
        poll: Duration,
        input_idle_ms: u32,
        _com: ComGuard,
    }

    impl UiaDesktop {
        /// Must be called on the thread that will drive the whole run.
        pub fn connect(timing: &TimingConfig) -> AutoconfResult<Self> {
            let com = ComGuard::new()?;
            let automation: IUIAutomation = unsafe {
                CoCreateInstance(&CUIAutomation, None, CLSCTX_ALL)
                    .map_err(|e| uia_err("CoCreateInstance UIA", e))?
            };
            let walker = unsafe {
                automation
                    .ControlViewWalker()
                    .map_err(|e| uia_err("ControlViewWalker", e))?
            };
            tracing::debug!("UI Automation connected");
            Ok(Self {
                automation,
                walker,
                poll: timing.window_poll(),
                input_idle_ms: timing.input_idle_timeout_ms,
                _com: com,
            })
        }

        fn top_level_named(&self, title: &str) -> AutoconfResult<Option<IUIAutomationElement>> {
            let root = unsafe {
                self.automation
                    .GetRootElement()
                    .map_err(|e| uia_err("GetRootElement", e))?
            };
            let Ok(mut child) = (unsafe { self.walker.GetFirstChildElement(&root) }) else {
                return Ok(None);
            };
            loop {
                if element_name(&child) == title {
                    return Ok(Some(child));
                }
                match unsafe { self.walker.GetNextSiblingElement(&child) } {
                    Ok(next) => child = next,
                    Err(_) => return Ok(None),
                }
            }
        }
    }

    impl Desktop for UiaDesktop {
        type Process = Child;
        type Window = UiaWindow;

        fn launch(&self, path: &Path) -> AutoconfResult<Child> {
            let child = Command::new(path).spawn()?;
            tracing::debug!(pid = child.id(), "process launched");
            Ok(child)
        }

        fn wait_for_input_idle(&self, process: &Child) -> AutoconfResult<()> {
            let handle = HANDLE(process.as_raw_handle());
            match unsafe { WaitForInputIdle(handle, self.input_idle_ms) } {
                0 => Ok(()),
                WAIT_TIMEOUT => {
                    tracing::warn!(pid = process.id(), "process not input-idle before timeout");
                    Ok(())
                }
                _ => Err(AutoconfError::Automation(format!(
                    "WaitForInputIdle failed: {}",
                    std::io::Error::last_os_error()
                ))),
            }
        }

        fn kill_by_name(&self, image: &str) -> AutoconfResult<()> {
            let status = Command::new("taskkill").args(["/F", "/IM", image]).status()?;
            if !status.success() {
                // Nothing to kill is fine: the process may already be gone.
                tracing::debug!(image, %status, "taskkill reported failure");
            }
            Ok(())
        }

        fn find_window(&self, title: &str, timeout: Duration) -> AutoconfResult<Option<UiaWindow>> {
            let deadline = Instant::now() + timeout;
            loop {
                if let Some(element) = self.top_level_named(title)? {
                    return Ok(Some(UiaWindow {
                        element,
                        walker: self.walker.clone(),
                    }));
                }
                if Instant::now() >= deadline {
                    return Ok(None);
                }
                std::thread::sleep(self.poll);
            }
        }
    }

    pub struct UiaWindow {
        element: IUIAutomationElement,
        walker: IUIAutomationTreeWalker,
    }

    impl UiaWindow {
        fn all(&self) -> Vec<IUIAutomationElement> {
            let mut out = Vec::new();
            walk_tree(&self.walker, &self.element, 0, &mut out);
            out
        }

        fn first_named(&self, name: &str, buttons_only: bool) -> Option<UiaElement> {
            self.all()
                .into_iter()
                .find(|e| {
                    element_name(e) == name
                        && (!buttons_only
                            || unsafe { e.CurrentControlType() }
                                .map(|ct| ct == UIA_ButtonControlTypeId)
                                .unwrap_or(false))
                })
                .map(|element| UiaElement { element })
        }
    }

    impl Window for UiaWindow {
        type Element = UiaElement;

        fn focus(&self) -> AutoconfResult<()> {
            unsafe { self.element.SetFocus() }.map_err(|e| uia_err("SetFocus", e))
        }

        fn button(&self, name: &str) -> AutoconfResult<Option<UiaElement>> {
            Ok(self.first_named(name, true))
        }

        fn control_by_name(&self, name: &str) -> AutoconfResult<Option<UiaElement>> {
            Ok(self.first_named(name, false))
        }

        fn descendants(&self) -> AutoconfResult<Vec<UiaElement>> {
            Ok(self
                .all()
                .into_iter()
                .map(|element| UiaElement { element })
                .collect())
        }
    }

    pub struct UiaElement {
        element: IUIAutomationElement,
    }

    impl UiaElement {
        fn toggle_pattern(&self) -> AutoconfResult<IUIAutomationTogglePattern> {
            unsafe {
                self.element
                    .GetCurrentPatternAs::<IUIAutomationTogglePattern>(UIA_TogglePatternId)
            }
            .map_err(|e| uia_err("TogglePattern", e))
        }

        fn invoke_pattern(&self) -> AutoconfResult<IUIAutomationInvokePattern> {
            unsafe {
                self.element
                    .GetCurrentPatternAs::<IUIAutomationInvokePattern>(UIA_InvokePatternId)
            }
            .map_err(|e| uia_err("InvokePattern", e))
        }
    }

    impl Element for UiaElement {
        fn name(&self) -> String {
            element_name(&self.element)
        }

        fn bounds(&self) -> AutoconfResult<Rect> {
            let rect: RECT = unsafe { self.element.CurrentBoundingRectangle() }
                .map_err(|e| uia_err("bbox", e))?;
            Ok(Rect {
                left: rect.left,
                top: rect.top,
                right: rect.right,
                bottom: rect.bottom,
            })
        }

        fn clickable_point(&self) -> AutoconfResult<Point> {
            let mut point = POINT::default();
            let mut found = BOOL::default();
            unsafe { self.element.GetClickablePoint(&mut point, &mut found) }
                .map_err(|e| uia_err("GetClickablePoint", e))?;
            if found.as_bool() {
                Ok(Point { x: point.x, y: point.y })
            } else {
                Ok(self.bounds()?.center())
            }
        }

        fn toggle_state(&self) -> AutoconfResult<bool> {
            let state = unsafe { self.toggle_pattern()?.CurrentToggleState() }
                .map_err(|e| uia_err("CurrentToggleState", e))?;
            Ok(state == ToggleState_On)
        }

        fn toggle(&self) -> AutoconfResult<()> {
            unsafe { self.toggle_pattern()?.Toggle() }.map_err(|e| uia_err("Toggle", e))
        }

        fn click(&self) -> AutoconfResult<()> {
            self.invoke()
        }

        fn invoke(&self) -> AutoconfResult<()> {
            unsafe { self.invoke_pattern()?.Invoke() }.map_err(|e| uia_err("Invoke", e))
        }
    }

    pub struct EnigoPointer {
        enigo: Enigo,
    }

    impl EnigoPointer {
        pub fn new() -> AutoconfResult<Self> {
            let enigo = Enigo::new(&Settings::default())
                .map_err(|e| AutoconfError::Automation(format!("enigo: {e}")))?;
            Ok(Self { enigo })
        }
    }

    impl Pointer for EnigoPointer {
        fn move_to(&mut self, point: Point) -> AutoconfResult<()> {
            self.enigo
                .move_mouse(point.x, point.y, Coordinate::Abs)
                .map_err(|e| AutoconfError::Automation(format!("move_mouse: {e}")))
        }

        fn left_click(&mut self) -> AutoconfResult<()> {
            self.enigo
                .button(Button::Left, Direction::Click)
                .map_err(|e| AutoconfError::Automation(format!("left click: {e}")))
        }
    }
}

// ── Entry point ─────────────────────────────────────────────────────────────

/// Runs the whole configuration against the live desktop.
/// Blocking; call it from a blocking thread (COM is not async-safe).
#[cfg(target_os = "windows")]
pub fn run_automation(
    config: &AppConfig,
    app_path: &Path,
    conf: &Configuration,
) -> AutoconfResult<RunReport> {
    let desktop = win::UiaDesktop::connect(&config.timing)?;
    let pointer = win::EnigoPointer::new()?;
    crate::run_session(
        &desktop,
        pointer,
        &crate::automation::pacing::SleepPacer,
        config,
        app_path,
        conf,
    )
}

#[cfg(not(target_os = "windows"))]
pub fn run_automation(
    _config: &AppConfig,
    _app_path: &Path,
    _conf: &Configuration,
) -> AutoconfResult<RunReport> {
    Err(crate::errors::AutoconfError::Automation(
        "Radeon Settings automation needs Windows UI Automation".into(),
    ))
}
