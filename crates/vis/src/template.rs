use std::fs::File;
use std::io::Write;
use std::path::Path;

use kpiboard_metrics::ChartView;
use kpiboard_metrics::Dashboard;
use kpiboard_metrics::pipeline::ChartModel;
use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::chart::Figure;
use crate::error::Result;

const INDEX_TEMPLATE_NAME: &str = "index";
const INDEX_TEMPLATE: &str = include_str!("./template/index.html.tt");

pub(crate) const SCRIPT: &str = include_str!("./template/dashboard.js");
pub(crate) const STYLESHEET: &str = include_str!("./template/dashboard.css");

pub(crate) struct TemplateEngine<'a> {
    index_file_path: &'a Path,
}

impl<'a> TemplateEngine<'a> {
    pub fn new(index_file_path: &'a Path) -> TemplateEngine<'a> {
        Self { index_file_path }
    }

    pub fn render(&self, context: &Context) -> Result<()> {
        let text = render_index(context)?;
        let mut file = File::create(self.index_file_path)?;

        file.write_all(text.as_bytes())?;
        file.flush()?;

        Ok(())
    }
}

pub(crate) fn render_index(context: &Context) -> Result<String> {
    let mut template = TinyTemplate::new();
    template.add_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;

    let text = template.render(INDEX_TEMPLATE_NAME, context)?;
    Ok(text)
}

#[derive(Serialize, Debug)]
pub(crate) struct Context {
    title: String,
    generated_at: String,
    refresh_secs: u64,
    cards: Vec<Card>,
}

impl Context {
    pub fn new(title: &str, dashboard: &Dashboard, refresh_secs: u64) -> Result<Context> {
        let cards = dashboard
            .charts
            .iter()
            .map(Card::new)
            .collect::<Result<Vec<Card>>>()?;

        Ok(Self {
            title: title.to_owned(),
            generated_at: dashboard.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            refresh_secs,
            cards,
        })
    }
}

/// A dashboard card: either a chart or the reason why there is none.
#[derive(Serialize, Debug)]
struct Card {
    id: String,
    title: String,
    ready: bool,
    message: String,
    current: String,
    has_trend: bool,
    trend_arrow: String,
    trend_color: String,
    trend_label: String,
    figure: String,
}

impl Card {
    fn new(view: &ChartView) -> Result<Card> {
        match view {
            ChartView::Ready(chart) => Card::chart(chart),
            ChartView::Empty(chart) => Ok(Self {
                id: chart.id.clone(),
                title: chart.title.clone(),
                ready: false,
                message: chart.message.to_owned(),
                current: String::new(),
                has_trend: false,
                trend_arrow: String::new(),
                trend_color: String::new(),
                trend_label: String::new(),
                figure: String::new(),
            }),
        }
    }

    fn chart(chart: &ChartModel) -> Result<Card> {
        let figure = serde_json::to_string(&Figure::new(chart))?;
        let trend = chart.trend.and_then(|t| t.direction().zip(t.sentiment()));

        let (has_trend, trend_arrow, trend_color, trend_label) = match trend {
            Some((direction, sentiment)) => (
                true,
                direction.arrow().to_owned(),
                sentiment.color().to_owned(),
                match chart.formatted.previous {
                    Some(ref previous) => format!("vs {previous}"),
                    None => String::new(),
                },
            ),
            None => (false, String::new(), String::new(), String::new()),
        };

        Ok(Self {
            id: chart.id.clone(),
            title: chart.title.clone(),
            ready: true,
            message: String::new(),
            current: chart.formatted.current.clone().unwrap_or_else(|| "–".to_owned()),
            has_trend,
            trend_arrow,
            trend_color,
            trend_label,
            // The figure is embedded verbatim in a script element.
            figure: figure.replace("</", "<\\/"),
        })
    }
}
