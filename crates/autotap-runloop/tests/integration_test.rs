//! End-to-end workflow tests against a scripted fake app.
//!
//! The fake app serves a mutable screen through `UiTreeProvider` and records
//! every gesture delivered through its `ExecutionChannel`. A transition
//! function lets gestures change the screen, so whole funnels can be played
//! out with paused time.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use autotap_config::Config;
use autotap_core::{ActionDispatcher, ChannelPriority, ChannelRegistry};
use autotap_protocols::{
    Bounds, ChannelError, ChannelKind, ExecutionChannel, PageState, Point, UiNode, UiTreeProvider,
};
use autotap_runloop::{
    CancellationToken, RunError, RunStatus, SlidePlanner, TerminalState, WorkflowController,
    WorkflowOrchestrator,
};

// ============================================================================
// Test Helpers
// ============================================================================

const DATES_ID: &str = "cn.damai:id/project_detail_perform_flowlayout";
const PRICES_ID: &str = "cn.damai:id/project_detail_perform_price_flowlayout";
const BUY_ID: &str = "cn.damai:id/bottom_layout";
const REFRESH_ID: &str = "cn.damai:id/state_view_refresh_btn";
const TAG_ID: &str = "cn.damai:id/layout_tag";
const ORDER_ACTIVITY: &str = "cn.damai/.ultron.view.activity.DmOrderActivity";
const CAPTCHA_ACTIVITY: &str =
    "cn.damai/com.alibaba.wireless.security.open.middletier.fc.ui.ContainerActivity";

const BUY_CENTER: Point = Point { x: 540.0, y: 1850.0 };
const SUBMIT_CENTER: Point = Point { x: 900.0, y: 1850.0 };

#[derive(Debug, Clone, Default)]
struct Screen {
    tree: Option<UiNode>,
    activity: Option<String>,
    package: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Click(Point),
    Drag(Point, Point, u64),
}

type Transition = Box<dyn Fn(&Gesture, usize, &mut Screen) + Send + Sync>;

struct FakeApp {
    screen: Mutex<Screen>,
    gestures: Mutex<Vec<Gesture>>,
    transition: Transition,
}

impl FakeApp {
    fn new(screen: Screen, transition: Transition) -> Arc<Self> {
        Arc::new(Self {
            screen: Mutex::new(screen),
            gestures: Mutex::new(Vec::new()),
            transition,
        })
    }

    fn deliver(&self, gesture: Gesture) -> Result<(), ChannelError> {
        let index = {
            let mut gestures = self.gestures.lock();
            gestures.push(gesture.clone());
            gestures.len() - 1
        };
        let mut screen = self.screen.lock();
        (self.transition)(&gesture, index, &mut *screen);
        Ok(())
    }

    fn gestures(&self) -> Vec<Gesture> {
        self.gestures.lock().clone()
    }
}

#[async_trait]
impl UiTreeProvider for FakeApp {
    async fn foreground_tree(&self) -> Option<UiNode> {
        self.screen.lock().tree.clone()
    }

    async fn foreground_package(&self) -> Option<String> {
        self.screen.lock().package.clone()
    }

    async fn foreground_activity(&self) -> Option<String> {
        self.screen.lock().activity.clone()
    }
}

struct FakeChannel(Arc<FakeApp>);

#[async_trait]
impl ExecutionChannel for FakeChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::GestureInjector
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn click(&self, at: Point) -> Result<(), ChannelError> {
        self.0.deliver(Gesture::Click(at))
    }

    async fn long_click(&self, _at: Point, _duration_ms: u64) -> Result<(), ChannelError> {
        Err(ChannelError::Unavailable("not scripted".to_string()))
    }

    async fn double_click(&self, _at: Point) -> Result<(), ChannelError> {
        Err(ChannelError::Unavailable("not scripted".to_string()))
    }

    async fn drag(&self, from: Point, to: Point, duration_ms: u64) -> Result<(), ChannelError> {
        self.0.deliver(Gesture::Drag(from, to, duration_ms))
    }

    async fn slide(&self, _from: Point, _to: Point, _steps: u32) -> Result<(), ChannelError> {
        Err(ChannelError::Unavailable("not scripted".to_string()))
    }

    async fn type_text(&self, _text: &str) -> Result<(), ChannelError> {
        Err(ChannelError::Unavailable("not scripted".to_string()))
    }

    async fn send_key(&self, _key_code: i32) -> Result<(), ChannelError> {
        Err(ChannelError::Unavailable("not scripted".to_string()))
    }
}

fn orchestrator(app: &Arc<FakeApp>, config: &Config) -> WorkflowOrchestrator {
    let registry = Arc::new(ChannelRegistry::new());
    registry
        .register(Arc::new(FakeChannel(app.clone())))
        .unwrap();
    let dispatcher = Arc::new(ActionDispatcher::new(registry, ChannelPriority::new()));
    WorkflowOrchestrator::with_planner(
        config,
        app.clone(),
        dispatcher,
        SlidePlanner::with_seed(&config.captcha, 11),
    )
}

fn option(id: &str, index: i32, top: i32) -> UiNode {
    UiNode::new("android.widget.FrameLayout")
        .with_id(id)
        .with_bounds(Bounds::new(100 * index, top, 100 * index + 80, top + 60))
        .clickable(true)
}

fn date_center(index: i32) -> Point {
    Point::new((100 * index + 40) as f32, 530.0)
}

fn price_center(index: i32) -> Point {
    Point::new((100 * index + 40) as f32, 730.0)
}

/// Ticket selection page. `prices` lists whether each option is sold out.
fn selection_screen(dates: i32, prices: &[bool]) -> Screen {
    let date_container = UiNode::new("android.view.ViewGroup")
        .with_id(DATES_ID)
        .with_children((0..dates).map(|i| option("", i, 500)));

    let price_container = UiNode::new("android.view.ViewGroup")
        .with_id(PRICES_ID)
        .with_children(prices.iter().enumerate().map(|(i, sold_out)| {
            let node = option("", i as i32, 700);
            if *sold_out {
                node.with_child(
                    UiNode::new("android.widget.TextView")
                        .with_id(TAG_ID)
                        .with_text("缺货登记"),
                )
            } else {
                node
            }
        }));

    let buy = UiNode::new("android.widget.FrameLayout")
        .with_id(BUY_ID)
        .with_bounds(Bounds::new(0, 1800, 1080, 1900))
        .clickable(true);

    Screen {
        tree: Some(
            UiNode::new("android.widget.FrameLayout")
                .with_children(vec![date_container, price_container, buy]),
        ),
        activity: Some("cn.damai/.ProjectDetailActivity".to_string()),
        package: Some("cn.damai".to_string()),
    }
}

fn order_screen() -> Screen {
    let submit = UiNode::new("android.widget.TextView")
        .with_text("立即提交")
        .with_bounds(Bounds::new(800, 1800, 1000, 1900))
        .clickable(true);
    Screen {
        tree: Some(UiNode::new("android.widget.FrameLayout").with_child(submit)),
        activity: Some(ORDER_ACTIVITY.to_string()),
        package: Some("cn.damai".to_string()),
    }
}

fn unknown_screen() -> Screen {
    Screen {
        tree: Some(UiNode::new("android.widget.FrameLayout")),
        activity: Some("com.launcher/.Home".to_string()),
        package: Some("com.launcher".to_string()),
    }
}

fn slider_track() -> UiNode {
    UiNode::new("android.view.View")
        .with_id("nc_1_n1t")
        .with_bounds(Bounds::new(100, 1200, 980, 1280))
}

fn slider_handle() -> UiNode {
    UiNode::new("android.view.View")
        .with_id("nc_1_n1z")
        .with_bounds(Bounds::new(100, 1200, 180, 1280))
}

fn no_transition() -> Transition {
    Box::new(|_: &Gesture, _: usize, _: &mut Screen| {})
}

// ============================================================================
// Funnel Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_purchase_funnel_completes() {
    let app = FakeApp::new(
        selection_screen(2, &[true, false]),
        Box::new(|gesture: &Gesture, _: usize, screen: &mut Screen| {
            if *gesture == Gesture::Click(BUY_CENTER) {
                *screen = order_screen();
            }
        }),
    );
    let orchestrator = orchestrator(&app, &Config::default());

    let outcome = orchestrator.run(CancellationToken::new()).await;

    assert!(outcome.success);
    assert_eq!(outcome.terminal, TerminalState::Completed);
    assert_eq!(outcome.last_page, PageState::OrderPage);
    assert_eq!(outcome.iterations, 2);
    assert_eq!(
        app.gestures(),
        vec![
            Gesture::Click(date_center(0)),
            // first price option is sold out
            Gesture::Click(price_center(1)),
            Gesture::Click(BUY_CENTER),
            Gesture::Click(SUBMIT_CENTER),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_dates_are_tried_round_robin() {
    let app = FakeApp::new(
        selection_screen(2, &[]),
        Box::new(|gesture: &Gesture, index: usize, screen: &mut Screen| {
            // second buy click lands on the order page
            if *gesture == Gesture::Click(BUY_CENTER) && index == 3 {
                *screen = order_screen();
            }
        }),
    );
    let orchestrator = orchestrator(&app, &Config::default());

    let outcome = orchestrator.run(CancellationToken::new()).await;

    assert!(outcome.success);
    assert_eq!(
        app.gestures(),
        vec![
            Gesture::Click(date_center(0)),
            Gesture::Click(BUY_CENTER),
            Gesture::Click(date_center(1)),
            Gesture::Click(BUY_CENTER),
            Gesture::Click(SUBMIT_CENTER),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_order_page_without_submit_fails() {
    let mut screen = order_screen();
    screen.tree = Some(UiNode::new("android.widget.FrameLayout"));
    let app = FakeApp::new(screen, no_transition());
    let orchestrator = orchestrator(&app, &Config::default());

    let outcome = orchestrator.run(CancellationToken::new()).await;

    assert!(!outcome.success);
    assert_eq!(outcome.terminal, TerminalState::Completed);
    assert!(app.gestures().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_network_error_refresh() {
    let mut screen = unknown_screen();
    screen.tree = Some(
        UiNode::new("android.widget.FrameLayout").with_child(
            UiNode::new("android.widget.Button")
                .with_id(REFRESH_ID)
                .with_bounds(Bounds::new(400, 1000, 680, 1100))
                .clickable(true),
        ),
    );
    let app = FakeApp::new(
        screen,
        Box::new(|gesture: &Gesture, _: usize, screen: &mut Screen| {
            if *gesture == Gesture::Click(Point::new(540.0, 1050.0)) {
                *screen = order_screen();
            }
        }),
    );
    let orchestrator = orchestrator(&app, &Config::default());

    let outcome = orchestrator.run(CancellationToken::new()).await;

    assert!(outcome.success);
    assert_eq!(
        app.gestures(),
        vec![
            Gesture::Click(Point::new(540.0, 1050.0)),
            Gesture::Click(SUBMIT_CENTER),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_buy_entry_primed_once() {
    let mut screen = order_screen();
    if let Some(tree) = screen.tree.as_mut() {
        tree.children.push(
            UiNode::new("android.widget.FrameLayout")
                .with_id("cn.damai:id/trade_project_detail_purchase_status_bar_container_fl")
                .with_bounds(Bounds::new(0, 0, 100, 100)),
        );
    }
    let app = FakeApp::new(screen, no_transition());
    let orchestrator = orchestrator(&app, &Config::default());

    orchestrator.run(CancellationToken::new()).await;

    assert_eq!(
        app.gestures(),
        vec![Gesture::Click(Point::new(50.0, 50.0)), Gesture::Click(SUBMIT_CENTER)]
    );
}

// ============================================================================
// Captcha Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_captcha_slider_drag() {
    let tree = UiNode::new("android.webkit.WebView")
        .with_child(slider_track())
        .with_child(slider_handle());
    let screen = Screen {
        tree: Some(tree),
        activity: Some(CAPTCHA_ACTIVITY.to_string()),
        package: Some("cn.damai".to_string()),
    };
    let app = FakeApp::new(
        screen,
        Box::new(|gesture: &Gesture, _: usize, screen: &mut Screen| {
            if matches!(gesture, Gesture::Drag(..)) {
                *screen = order_screen();
            }
        }),
    );
    let orchestrator = orchestrator(&app, &Config::default());

    let outcome = orchestrator.run(CancellationToken::new()).await;
    assert!(outcome.success);

    let gestures = app.gestures();
    let Gesture::Drag(from, to, duration) = &gestures[0] else {
        panic!("expected a drag, got {:?}", gestures[0]);
    };
    assert_eq!(from.x, 140.0);
    assert_eq!(to.x, 940.0);
    assert!((1235.0..=1245.0).contains(&from.y));
    assert!((1235.0..=1245.0).contains(&to.y));
    assert!((1000..=1500).contains(duration));
}

#[tokio::test(start_paused = true)]
async fn test_captcha_retry_control_preferred() {
    let retry = UiNode::new("android.view.View")
        .with_id("nc_1_refresh1")
        .with_child(
            UiNode::new("android.widget.TextView")
                .with_text("出错了，点击重试")
                .with_bounds(Bounds::new(200, 600, 400, 700)),
        );
    let tree = UiNode::new("android.webkit.WebView")
        .with_child(retry)
        .with_child(slider_track())
        .with_child(slider_handle());
    let screen = Screen {
        tree: Some(tree),
        activity: Some(CAPTCHA_ACTIVITY.to_string()),
        package: None,
    };
    let app = FakeApp::new(
        screen,
        Box::new(|_: &Gesture, _: usize, screen: &mut Screen| {
            *screen = order_screen();
        }),
    );
    let orchestrator = orchestrator(&app, &Config::default());

    orchestrator.run(CancellationToken::new()).await;

    assert_eq!(
        app.gestures(),
        vec![Gesture::Click(Point::new(300.0, 650.0)), Gesture::Click(SUBMIT_CENTER)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_unsolvable_captcha_spends_budget() {
    let screen = Screen {
        tree: Some(UiNode::new("android.webkit.WebView")),
        activity: Some(CAPTCHA_ACTIVITY.to_string()),
        package: None,
    };
    let app = FakeApp::new(screen, no_transition());
    let mut config = Config::default();
    config.workflow.retry_budget = 4;
    let orchestrator = orchestrator(&app, &config);

    let outcome = orchestrator.run(CancellationToken::new()).await;

    assert_eq!(outcome.terminal, TerminalState::Exhausted);
    assert_eq!(outcome.last_page, PageState::CaptchaChallenge);
    assert_eq!(outcome.iterations, 4);
}

// ============================================================================
// Budget and Cancellation Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_unknown_page_exhausts_budget() {
    let app = FakeApp::new(unknown_screen(), no_transition());
    let mut config = Config::default();
    config.workflow.retry_budget = 3;
    let orchestrator = orchestrator(&app, &config);

    let started = tokio::time::Instant::now();
    let outcome = orchestrator.run(CancellationToken::new()).await;

    assert!(!outcome.success);
    assert_eq!(outcome.terminal, TerminalState::Exhausted);
    assert_eq!(outcome.last_page, PageState::Unknown);
    assert_eq!(outcome.iterations, 3);
    // one 2s wait per unknown iteration
    assert_eq!(started.elapsed(), Duration::from_millis(6000));
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_before_start() {
    let app = FakeApp::new(selection_screen(1, &[]), no_transition());
    let orchestrator = orchestrator(&app, &Config::default());

    let token = CancellationToken::new();
    token.cancel();
    let outcome = orchestrator.run(token).await;

    assert_eq!(outcome.terminal, TerminalState::Stopped);
    assert_eq!(outcome.iterations, 0);
    assert!(app.gestures().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_before_start_skips_priming() {
    let mut screen = unknown_screen();
    if let Some(tree) = screen.tree.as_mut() {
        tree.children.push(
            UiNode::new("android.widget.FrameLayout")
                .with_id("cn.damai:id/trade_project_detail_purchase_status_bar_container_fl")
                .with_bounds(Bounds::new(0, 0, 100, 100)),
        );
    }
    let app = FakeApp::new(screen, no_transition());
    let orchestrator = orchestrator(&app, &Config::default());

    let token = CancellationToken::new();
    token.cancel();
    let outcome = orchestrator.run(token).await;

    assert_eq!(outcome.terminal, TerminalState::Stopped);
    assert_eq!(outcome.iterations, 0);
    assert!(!outcome.success);
    assert!(app.gestures().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_no_dates_does_not_spend_budget() {
    let app = FakeApp::new(selection_screen(0, &[]), no_transition());
    let mut config = Config::default();
    config.workflow.retry_budget = 1;
    let controller = WorkflowController::new(Arc::new(orchestrator(&app, &config)));

    let handle = controller.start().unwrap();
    tokio::time::sleep(Duration::from_millis(10_500)).await;
    assert!(controller.is_active());
    assert!(controller.stop());

    let outcome = handle.await.unwrap();
    assert_eq!(outcome.terminal, TerminalState::Stopped);
    assert_eq!(outcome.last_page, PageState::TicketSelectionPage);
    assert!(outcome.iterations >= 10);
}

// ============================================================================
// Controller Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_controller_single_active_run() {
    let app = FakeApp::new(unknown_screen(), no_transition());
    let controller = WorkflowController::new(Arc::new(orchestrator(&app, &Config::default())));
    assert_eq!(controller.status(), RunStatus::Idle);
    assert!(!controller.stop());

    let handle = controller.start().unwrap();
    assert!(controller.is_active());
    assert_eq!(controller.status(), RunStatus::Running);
    assert!(matches!(controller.start(), Err(RunError::AlreadyRunning)));

    tokio::time::sleep(Duration::from_millis(3000)).await;
    controller.stop();
    let outcome = handle.await.unwrap();

    assert_eq!(outcome.terminal, TerminalState::Stopped);
    assert!(!controller.is_active());
    assert_eq!(
        controller.status(),
        RunStatus::Finished(TerminalState::Stopped)
    );

    // a fresh run may start once the previous one ended
    let handle = controller.start().unwrap();
    controller.stop();
    assert_eq!(handle.await.unwrap().terminal, TerminalState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_controller_run_to_completion() {
    let app = FakeApp::new(order_screen(), no_transition());
    let controller = WorkflowController::new(Arc::new(orchestrator(&app, &Config::default())));

    let outcome = controller.run().await.unwrap();
    assert!(outcome.success);
    assert_eq!(
        controller.status(),
        RunStatus::Finished(TerminalState::Completed)
    );
}
