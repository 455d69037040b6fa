//! The simulation session
//!
//! One struct owns every piece of mutable simulation state. Each user action
//! and each tick goes through a single method, so callers sharing a session
//! behind a lock never observe a half-applied update.

use super::history::{PerformanceHistory, PerformancePoint};
use super::notices::{NoticeBoard, NoticeKind};
use super::snapshot::{AccountSnapshot, NoticeView, SessionSnapshot};
use super::state::{SessionError, SessionPhase};
use crate::analytics::{MarketSentiment, QuarterSummary, SimCalendar, StockDashboard, TimeFrame};
use crate::config::{validate_params, Config};
use crate::portfolio::{Account, BuyAndHold, TradeLog, TradeRecord, TradeRejected, TradeSide, Trader};
use crate::price::{
    DataMode, GbmGenerator, GbmParams, PriceFeed, PricePoint, SeededUniform, ShockOverlay,
    VolatilityShock,
};
use crate::signal::{Action, RuleEvaluator};
use crate::telemetry::{set_decimal_gauge, set_gauge, GaugeMetric};
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Fixed-size jumps for synthetic mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
pub enum AdvancePreset {
    /// 63 ticks
    #[value(name = "1q")]
    Quarter,
    /// 252 ticks
    #[value(name = "1y")]
    Year,
    /// 1260 ticks
    #[value(name = "5y")]
    FiveYears,
}

impl AdvancePreset {
    pub fn ticks(&self) -> usize {
        match self {
            Self::Quarter => 63,
            Self::Year => 252,
            Self::FiveYears => 1260,
        }
    }
}

/// Result of a successful tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// A new point was processed
    Advanced(TickReport),
    /// The series ended; the session is now paused
    Finished,
}

/// What happened on one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Stored price point
    pub point: PricePoint,
    /// Price trades executed at
    pub quote: Decimal,
    /// Trade placed by the bot, if any
    pub bot_trade: Option<TradeRecord>,
    /// Shock that fired this tick, if any
    pub shock: Option<VolatilityShock>,
}

/// Simulation state for one instrument
pub struct Session {
    config: Config,
    phase: SessionPhase,
    mode: Option<DataMode>,
    ticker: Option<String>,
    feed: Option<PriceFeed>,
    shocks: Option<ShockOverlay>,
    /// Stored series up to the current tick
    prices: Vec<PricePoint>,
    manual: Account,
    bot: Account,
    baseline: Option<BuyAndHold>,
    evaluator: RuleEvaluator,
    bot_enabled: bool,
    trades: TradeLog,
    performance: PerformanceHistory,
    notices: NoticeBoard,
    params: GbmParams,
    speed: u32,
    calendar: SimCalendar,
}

impl Session {
    /// Create an uninitialized session
    pub fn new(config: Config) -> Self {
        let initial_cash = config.account.initial_cash;
        Self {
            phase: SessionPhase::Uninitialized,
            mode: None,
            ticker: None,
            feed: None,
            shocks: None,
            prices: Vec::new(),
            manual: Account::new(Trader::Manual, initial_cash),
            bot: Account::new(Trader::Bot, initial_cash),
            baseline: None,
            evaluator: RuleEvaluator::new(config.bot.rule, config.bot.quantity),
            bot_enabled: config.bot.enabled,
            trades: TradeLog::new(),
            performance: PerformanceHistory::default(),
            notices: NoticeBoard::new(config.playback.notice_ttl()),
            params: config.synthetic.params(),
            speed: config.playback.speed.max(1),
            calendar: SimCalendar::new(config.calendar.start_date),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn mode(&self) -> Option<DataMode> {
        self.mode
    }

    pub fn ticker(&self) -> Option<&str> {
        self.ticker.as_deref()
    }

    /// Choose a data mode, discarding all previous state
    ///
    /// Synthetic sessions are ready immediately. Historical sessions stay in
    /// `Loading` until [`Session::finish_loading`] supplies the series.
    pub fn select_mode(&mut self, mode: DataMode, ticker: Option<String>) -> SessionPhase {
        self.reset();
        self.mode = Some(mode);
        self.phase = SessionPhase::Loading;
        tracing::info!(%mode, ticker = ticker.as_deref(), "Mode selected");

        match mode {
            DataMode::Synthetic => {
                self.ticker = None;
                let synthetic = self.config.synthetic.clone();
                let generator = GbmGenerator::new(
                    synthetic.initial_price,
                    self.params,
                    Box::new(SeededUniform::new(synthetic.seed)),
                );
                self.shocks = Some(ShockOverlay::new(
                    synthetic.shock_probability,
                    synthetic.shock_duration(),
                    Box::new(SeededUniform::new(synthetic.seed.map(|s| s.wrapping_add(1)))),
                ));
                self.become_ready(PriceFeed::synthetic(generator, synthetic.max_points));
            }
            DataMode::Historical => {
                self.ticker = ticker;
            }
        }
        self.phase
    }

    /// Supply the loaded historical series
    ///
    /// An empty series leaves the session in `Loading`.
    pub fn finish_loading(&mut self, points: Vec<PricePoint>) -> Result<SessionPhase, SessionError> {
        if self.phase != SessionPhase::Loading || self.mode != Some(DataMode::Historical) {
            return Err(self.invalid("finish loading"));
        }
        if points.is_empty() {
            tracing::warn!(ticker = self.ticker.as_deref(), "No historical prices, still loading");
            return Ok(self.phase);
        }

        tracing::info!(
            ticker = self.ticker.as_deref(),
            points = points.len(),
            "Historical series ready"
        );
        self.become_ready(PriceFeed::historical(points));
        Ok(self.phase)
    }

    fn become_ready(&mut self, mut feed: PriceFeed) {
        let first = feed.next_point();
        self.feed = Some(feed);
        if let Some(point) = first {
            self.phase = SessionPhase::Ready;
            self.process_point(point, point.price);
        }
    }

    /// Start or resume playback
    pub fn start(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Ready | SessionPhase::Paused => {
                if self.feed.as_ref().is_some_and(PriceFeed::is_exhausted) {
                    return Err(SessionError::SeriesFinished);
                }
                self.phase = SessionPhase::Running;
                tracing::info!(tick = self.current_tick(), "Playback started");
                Ok(())
            }
            _ => Err(self.invalid("start")),
        }
    }

    /// Pause playback
    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Running {
            return Err(self.invalid("pause"));
        }
        self.phase = SessionPhase::Paused;
        tracing::info!(tick = self.current_tick(), "Playback paused");
        Ok(())
    }

    /// Discard all state and return to `Uninitialized`
    ///
    /// Generator parameters and speed are kept.
    pub fn reset(&mut self) {
        let initial_cash = self.config.account.initial_cash;
        self.phase = SessionPhase::Uninitialized;
        self.mode = None;
        self.ticker = None;
        self.feed = None;
        self.shocks = None;
        self.prices.clear();
        self.manual = Account::new(Trader::Manual, initial_cash);
        self.bot = Account::new(Trader::Bot, initial_cash);
        self.baseline = None;
        self.trades = TradeLog::new();
        self.performance = PerformanceHistory::default();
        self.notices.clear();
        tracing::debug!("Session reset");
    }

    /// Advance one tick
    pub fn tick(&mut self, now: Instant) -> Result<TickOutcome, SessionError> {
        if self.phase != SessionPhase::Running {
            return Err(self.invalid("tick"));
        }

        let Some(point) = self.feed.as_mut().and_then(PriceFeed::next_point) else {
            self.phase = SessionPhase::Paused;
            self.notices.post(NoticeKind::Info, "End of price data", now);
            tracing::info!(tick = self.current_tick(), "Price series finished");
            return Ok(TickOutcome::Finished);
        };

        let shock = self.shocks.as_mut().and_then(|overlay| overlay.roll(now));
        if let Some(shock) = shock {
            self.notices.post(NoticeKind::Shock, shock.kind.message(), now);
            tracing::info!(tick = point.time, kind = ?shock.kind, multiplier = shock.multiplier, "Volatility shock");
        }

        let quote = self.quote_for(point.price, now);
        let bot_trade = self.process_point(point, quote);
        Ok(TickOutcome::Advanced(TickReport {
            point,
            quote,
            bot_trade,
            shock,
        }))
    }

    /// Generate and process `ticks` points at once, synthetic mode only
    ///
    /// Returns the number of points processed, which is lower than `ticks`
    /// when a capped series runs out.
    pub fn advance(&mut self, ticks: usize, now: Instant) -> Result<usize, SessionError> {
        if self.mode != Some(DataMode::Synthetic) {
            return Err(SessionError::SyntheticOnly("Advance"));
        }
        if !self.phase.has_price() {
            return Err(self.invalid("advance"));
        }

        let mut processed = 0;
        while processed < ticks {
            let Some(point) = self.feed.as_mut().and_then(PriceFeed::next_point) else {
                if self.phase == SessionPhase::Running {
                    self.phase = SessionPhase::Paused;
                }
                break;
            };
            let quote = self.quote_for(point.price, now);
            self.process_point(point, quote);
            processed += 1;
        }

        tracing::info!(processed, tick = self.current_tick(), "Advanced");
        Ok(processed)
    }

    fn process_point(&mut self, point: PricePoint, quote: Decimal) -> Option<TradeRecord> {
        self.prices.push(point);
        let initial_cash = self.manual.initial_cash;
        let baseline = *self
            .baseline
            .get_or_insert_with(|| BuyAndHold::initialize(initial_cash, quote));

        let bot_trade = if self.bot_enabled {
            self.run_bot(point.time, quote)
        } else {
            None
        };

        let record = PerformancePoint {
            tick: point.time,
            manual: self.manual.net_worth(quote),
            bot: self.bot.net_worth(quote),
            baseline: baseline.net_worth(quote),
        };
        self.performance.record(record);
        if self.config.telemetry.metrics_enabled {
            publish_gauges(&record, quote);
        }

        tracing::debug!(
            tick = point.time,
            price = %point.price,
            %quote,
            manual = %record.manual,
            bot = %record.bot,
            baseline = %record.baseline,
            "Tick processed"
        );
        bot_trade
    }

    fn run_bot(&mut self, time: u64, quote: Decimal) -> Option<TradeRecord> {
        let signal = self.evaluator.evaluate(&self.prices, quote, &self.bot.view());
        let side = match signal.action {
            Action::Buy => TradeSide::Buy,
            Action::Sell => TradeSide::Sell,
            Action::Hold => return None,
        };

        match self.bot.apply_trade(side, signal.quantity, quote, time) {
            Ok(trade) => {
                tracing::info!(tick = time, %trade, "Bot trade");
                self.trades.append(trade.clone());
                Some(trade)
            }
            Err(e) => {
                tracing::warn!(tick = time, error = %e, "Bot trade rejected");
                None
            }
        }
    }

    /// Manual buy of `quantity` shares at the current quote
    pub fn manual_buy(&mut self, quantity: u64, now: Instant) -> Result<TradeRecord, SessionError> {
        self.manual_trade("buy", now, |account, price, time| {
            account.apply_trade(TradeSide::Buy, quantity, price, time)
        })
    }

    /// Manual sell of up to `quantity` shares at the current quote
    pub fn manual_sell(&mut self, quantity: u64, now: Instant) -> Result<TradeRecord, SessionError> {
        self.manual_trade("sell", now, |account, price, time| {
            account.apply_trade(TradeSide::Sell, quantity, price, time)
        })
    }

    /// Spend all manual cash
    pub fn buy_all(&mut self, now: Instant) -> Result<TradeRecord, SessionError> {
        self.manual_trade("buy", now, Account::buy_all)
    }

    /// Sell the whole manual position
    pub fn sell_all(&mut self, now: Instant) -> Result<TradeRecord, SessionError> {
        self.manual_trade("sell", now, Account::sell_all)
    }

    fn manual_trade<F>(&mut self, action: &'static str, now: Instant, trade: F) -> Result<TradeRecord, SessionError>
    where
        F: FnOnce(&mut Account, Decimal, u64) -> Result<TradeRecord, TradeRejected>,
    {
        let point = match self.prices.last() {
            Some(point) if self.phase.has_price() => *point,
            _ => return Err(self.invalid(action)),
        };
        let quote = self.quote_for(point.price, now);

        match trade(&mut self.manual, quote, point.time) {
            Ok(record) => {
                let verb = match record.side {
                    TradeSide::Buy => "Bought",
                    TradeSide::Sell => "Sold",
                };
                self.notices.post(
                    NoticeKind::Info,
                    format!("{verb} {} shares at ${:.2}", record.shares, record.price),
                    now,
                );
                tracing::info!(tick = point.time, trade = %record, "Manual trade");
                self.trades.append(record.clone());
                Ok(record)
            }
            Err(e) => {
                self.notices.post(NoticeKind::Warning, e.to_string(), now);
                tracing::warn!(tick = point.time, error = %e, "Manual trade rejected");
                Err(e.into())
            }
        }
    }

    /// Change drift and volatility for subsequently generated points
    pub fn set_params(&mut self, params: GbmParams) -> Result<(), SessionError> {
        if self.mode == Some(DataMode::Historical) {
            return Err(SessionError::SyntheticOnly("Changing drift and volatility"));
        }
        validate_params(params.drift, params.volatility)?;

        self.params = params;
        if let Some(feed) = self.feed.as_mut() {
            feed.set_params(params);
        }
        tracing::info!(drift = params.drift, volatility = params.volatility, "Parameters updated");
        Ok(())
    }

    pub fn params(&self) -> GbmParams {
        self.params
    }

    /// Set playback speed in ticks per second
    pub fn set_speed(&mut self, speed: u32) -> Result<(), SessionError> {
        if speed == 0 {
            return Err(SessionError::InvalidSpeed);
        }
        self.speed = speed;
        tracing::debug!(speed, "Speed updated");
        Ok(())
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Delay between ticks: 1000 / speed milliseconds
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.speed.max(1)))
    }

    /// Turn automatic bot trading on or off
    pub fn set_bot_enabled(&mut self, enabled: bool) {
        self.bot_enabled = enabled;
        tracing::info!(enabled, "Bot toggled");
    }

    pub fn bot_enabled(&self) -> bool {
        self.bot_enabled
    }

    /// Index of the most recently processed tick
    pub fn current_tick(&self) -> Option<u64> {
        self.prices.last().map(|p| p.time)
    }

    /// Current price as shown to traders
    pub fn quote(&self, now: Instant) -> Option<Decimal> {
        self.prices.last().map(|p| self.quote_for(p.price, now))
    }

    fn quote_for(&self, price: Decimal, now: Instant) -> Decimal {
        self.shocks
            .as_ref()
            .map_or(price, |overlay| overlay.quote(price, now))
    }

    /// Stored price series up to the current tick
    pub fn prices(&self) -> &[PricePoint] {
        &self.prices
    }

    pub fn manual(&self) -> &Account {
        &self.manual
    }

    pub fn bot(&self) -> &Account {
        &self.bot
    }

    pub fn baseline(&self) -> Option<&BuyAndHold> {
        self.baseline.as_ref()
    }

    pub fn evaluator(&self) -> &RuleEvaluator {
        &self.evaluator
    }

    pub fn trades(&self) -> &TradeLog {
        &self.trades
    }

    pub fn performance(&self) -> &PerformanceHistory {
        &self.performance
    }

    pub fn calendar(&self) -> &SimCalendar {
        &self.calendar
    }

    pub fn dashboard(&self, time_frame: TimeFrame) -> Option<StockDashboard> {
        StockDashboard::compute(&self.prices, time_frame)
    }

    pub fn quarterly_summaries(&self) -> Vec<QuarterSummary> {
        self.calendar.quarterly_summaries(&self.prices)
    }

    /// Drop expired notices
    pub fn prune_notices(&mut self, now: Instant) {
        self.notices.prune(now);
    }

    /// Renderable view of the session at `now`
    pub fn snapshot(&self, now: Instant) -> SessionSnapshot {
        let quote = self.quote(now);
        let price = self.prices.last().map(|p| p.price);
        let mark = quote.unwrap_or_default();

        SessionSnapshot {
            phase: self.phase,
            mode: self.mode,
            ticker: self.ticker.clone(),
            tick: self.current_tick(),
            price,
            quote,
            shock: self
                .shocks
                .as_ref()
                .and_then(|overlay| overlay.active(now))
                .map(|shock| shock.kind),
            manual: AccountSnapshot::new(&self.manual, mark),
            bot: AccountSnapshot::new(&self.bot, mark),
            baseline_net_worth: self.baseline.map(|b| b.net_worth(mark)),
            bot_enabled: self.bot_enabled,
            recent_trades: self
                .trades
                .recent(self.config.playback.recent_trades)
                .to_vec(),
            notices: self
                .notices
                .visible(now)
                .map(|n| NoticeView {
                    kind: n.kind,
                    message: n.message.clone(),
                })
                .collect(),
            params: (self.mode != Some(DataMode::Historical)).then_some(self.params),
            sentiment: (self.mode == Some(DataMode::Synthetic))
                .then(|| MarketSentiment::from_params(&self.params)),
            calendar: self.current_tick().map(|t| self.calendar.position(t)),
            speed: self.speed,
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            phase: self.phase,
        }
    }
}

fn publish_gauges(record: &PerformancePoint, quote: Decimal) {
    set_decimal_gauge(GaugeMetric::ManualNetWorth, record.manual);
    set_decimal_gauge(GaugeMetric::BotNetWorth, record.bot);
    set_decimal_gauge(GaugeMetric::BaselineNetWorth, record.baseline);
    set_decimal_gauge(GaugeMetric::LastPrice, quote);
    set_gauge(GaugeMetric::Tick, record.tick as f64);
}
