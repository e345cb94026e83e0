use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::carousel::Carousel;
use crate::config::Config;
use crate::content::{Portfolio, Slide};
use crate::error::AppResult;
use crate::page::{CarouselSlot, PageLayout, build_document};
use crate::sync::{RouteSink, SectionId, SectionNavigator, ViewportObserver, resolve_provider};

use super::retry::{NavRetryPolicy, PendingNavigation};
use super::state::AppState;

/// Viewport height assumed until the terminal reports its size.
const INITIAL_VIEWPORT_ROWS: u32 = 24;

/// Route sink that records the latest path where the app can read it.
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedRoute(Rc<RefCell<String>>);

impl SharedRoute {
    pub(crate) fn current(&self) -> String {
        self.0.borrow().clone()
    }
}

impl RouteSink for SharedRoute {
    fn update_path(&mut self, path: &str) {
        tracing::trace!(path, "route updated");
        *self.0.borrow_mut() = path.to_string();
    }
}

pub struct SyncSubsystem {
    pub navigator: SectionNavigator,
    pub observer: ViewportObserver,
    pub(crate) pending: Option<PendingNavigation>,
    /// Set when a settle window closes; the next frame hands the observer's
    /// current winner to the navigator.
    pub(crate) resync_after_settle: bool,
    pub(crate) retry: NavRetryPolicy,
    pub(crate) route: SharedRoute,
}

pub struct CarouselSubsystem {
    pub skills: Carousel<Slide>,
    pub certifications: Carousel<Slide>,
    pub(crate) skill_slides: Vec<Slide>,
    pub(crate) certification_slides: Vec<Slide>,
}

impl CarouselSubsystem {
    pub fn get(&self, slot: CarouselSlot) -> &Carousel<Slide> {
        match slot {
            CarouselSlot::Skills => &self.skills,
            CarouselSlot::Certifications => &self.certifications,
        }
    }

    pub fn get_mut(&mut self, slot: CarouselSlot) -> &mut Carousel<Slide> {
        match slot {
            CarouselSlot::Skills => &mut self.skills,
            CarouselSlot::Certifications => &mut self.certifications,
        }
    }

    /// Gives the carousel its items once its section is on the page.
    pub(crate) fn on_section_mounted(&mut self, id: &SectionId, now: Instant) {
        match id.as_str() {
            "skills" => self.skills.set_items(self.skill_slides.clone(), now),
            "certifications" => self
                .certifications
                .set_items(self.certification_slides.clone(), now),
            _ => {}
        }
    }

    pub(crate) fn unmount_all(&mut self) {
        self.skills.unmount();
        self.certifications.unmount();
    }
}

pub struct App {
    pub state: AppState,
    pub page: PageLayout,
    pub sync: SyncSubsystem,
    pub carousels: CarouselSubsystem,
    pub config: Config,
}

impl App {
    pub fn new(portfolio: &Portfolio, config: Config, now: Instant) -> AppResult<Self> {
        let (registry, views) = build_document(portfolio)?;
        let page = PageLayout::new(
            views,
            config.page.lazy_root_margin,
            Duration::from_millis(config.page.scroll_animation_ms),
            INITIAL_VIEWPORT_ROWS,
        );

        let provider = resolve_provider(&config.sync.provider_candidates());
        let mut observer = ViewportObserver::new(provider, config.sync.observer_config());
        for section in registry.iter() {
            if let Err(err) = observer.register(section, &page) {
                tracing::trace!(section = %section.id, error = %err, "section registers on mount");
            }
        }

        let route = SharedRoute::default();
        let navigator = SectionNavigator::new(
            registry,
            config.sync.settle_delay(),
            Box::new(route.clone()),
        );

        // Carousels stay idle until their section mounts.
        let carousel_config = config.carousel.carousel_config();
        let carousels = CarouselSubsystem {
            skills: Carousel::new(Vec::new(), carousel_config, now),
            certifications: Carousel::new(Vec::new(), carousel_config, now),
            skill_slides: portfolio.featured_skills(),
            certification_slides: portfolio.featured_certifications(),
        };

        let retry = NavRetryPolicy {
            max_attempts: config.page.nav_retry_attempts,
            base_backoff: Duration::from_millis(config.page.nav_retry_backoff_ms),
        };

        let state = AppState {
            current_path: navigator.registry().first().path.clone(),
            ..AppState::default()
        };

        tracing::info!(
            sections = navigator.registry().len(),
            provider = observer.provider_kind().id(),
            settle_ms = config.sync.settle_delay_ms,
            "page session started"
        );

        Ok(Self {
            state,
            page,
            sync: SyncSubsystem {
                navigator,
                observer,
                pending: None,
                resync_after_settle: false,
                retry,
                route,
            },
            carousels,
            config,
        })
    }

    /// Carousel belonging to the active section, if it has one.
    pub fn focused_carousel_slot(&self) -> Option<CarouselSlot> {
        match self.sync.navigator.active().as_str() {
            "skills" => Some(CarouselSlot::Skills),
            "certifications" => Some(CarouselSlot::Certifications),
            _ => None,
        }
    }

    pub(crate) fn sync_route_into_state(&mut self) -> bool {
        let path = self.sync.route.current();
        if path.is_empty() || path == self.state.current_path {
            return false;
        }
        self.state.current_path = path;
        true
    }

    /// Tears the page session down: timers stop, nothing fires afterwards.
    pub fn shutdown(&mut self) {
        self.carousels.unmount_all();
        self.sync.pending = None;
        self.sync.resync_after_settle = false;
        tracing::info!("page session ended");
    }
}
