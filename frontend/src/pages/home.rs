use chrono::Datelike;
use log::debug;
use yew::prelude::*;

use crate::analytics::{track_event, TrackedEvent};
use crate::animation::counter::Counter;
use crate::animation::scroll::{anchor_target, parallax_offset, scroll_to_section, use_scroll_reveal, use_scroll_y};
use crate::animation::typewriter::TypedCode;
use crate::charts::board::{use_chart_bootstrap, ChartCanvas};
use crate::charts::data::DataSource;
use crate::charts::spec::{
    COST_DISTRIBUTION, COST_TRENDS, EFFICIENCY, NODE_UTILIZATION, SAVINGS, SAVINGS_BREAKDOWN, UTILIZATION,
};
use crate::components::copy_button::CodeBlock;
use crate::config::{SiteConfig, APP_NAME};
use crate::forms::contact::ContactForm;
use crate::forms::email::{DownloadForm, NewsletterForm};
use crate::pages::docs::DocsTabs;

const DEMO_COMMAND: &str = "$ kubeopt analyze --cluster prod-aks-westeu\n\
✓ 42 nodes scanned across 6 node pools\n\
✓ 318 workloads profiled over 30 days\n\
→ Potential savings: $7,200 / month (38%)";

struct Feature {
    icon: &'static str,
    title: &'static str,
    body: &'static str,
}

const FEATURES: [Feature; 6] = [
    Feature {
        icon: "📉",
        title: "Right-sizing",
        body: "Matches CPU and memory requests to what your pods really use.",
    },
    Feature {
        icon: "🧩",
        title: "Node pool planning",
        body: "Finds the VM sizes that pack your workloads with the least waste.",
    },
    Feature {
        icon: "🌙",
        title: "Idle detection",
        body: "Spots dev and staging clusters that sit unused overnight.",
    },
    Feature {
        icon: "💸",
        title: "Spot readiness",
        body: "Flags stateless workloads that can move to spot instances safely.",
    },
    Feature {
        icon: "🔒",
        title: "Runs in your tenant",
        body: "Ships as a container. Your cluster data never leaves Azure.",
    },
    Feature {
        icon: "📊",
        title: "Clear reports",
        body: "Monthly cost trends and savings broken down per category.",
    },
];

struct Plan {
    name: &'static str,
    price: &'static str,
    blurb: &'static str,
    featured: bool,
}

const PLANS: [Plan; 3] = [
    Plan {
        name: "Community",
        price: "Free",
        blurb: "One cluster, analysis reports, community support.",
        featured: false,
    },
    Plan {
        name: "Team",
        price: "$199/mo",
        blurb: "Up to 10 clusters, scheduled analysis, optimization playbooks.",
        featured: true,
    },
    Plan {
        name: "Enterprise",
        price: "Custom",
        blurb: "Unlimited clusters, SSO, dedicated support engineer.",
        featured: false,
    },
];

/// Tracked in-page link that scrolls smoothly instead of jumping.
fn anchor_link(config: &SiteConfig, name: &'static str, href: &'static str) -> Callback<MouseEvent> {
    let config = config.clone();
    Callback::from(move |e: MouseEvent| {
        track_event(&config, TrackedEvent::click(name));
        if let Some(id) = anchor_target(href) {
            e.prevent_default();
            scroll_to_section(id);
        }
    })
}

#[derive(Properties, PartialEq)]
pub struct HomeProps {
    /// Section to bring into view once the page has mounted.
    #[prop_or_default]
    pub anchor: Option<&'static str>,
}

#[function_component(Home)]
pub fn home(props: &HomeProps) -> Html {
    let config = use_context::<SiteConfig>().unwrap_or_default();
    let scroll_y = use_scroll_y();
    let data_source = use_chart_bootstrap();
    use_scroll_reveal();

    {
        use_effect_with_deps(
            move |anchor| {
                match anchor {
                    Some(id) => {
                        if !scroll_to_section(id) {
                            debug!("No section #{} to scroll to", id);
                        }
                    }
                    None => {
                        if let Some(window) = web_sys::window() {
                            window.scroll_to_with_x_and_y(0.0, 0.0);
                        }
                    }
                }
                || ()
            },
            props.anchor,
        );
    }

    let hero_style = format!("transform: translateY({}px);", parallax_offset(scroll_y));
    let year = chrono::Local::now().year();

    html! {
        <div class="landing-page">
            <section id="hero" class="hero">
                <div class="hero-background" style={hero_style}></div>
                <div class="hero-content">
                    <h1>{"Cut your AKS bill without touching a YAML file"}</h1>
                    <p class="hero-subtitle">
                        {format!("{} analyzes your Azure Kubernetes clusters and tells you exactly what to resize, consolidate and switch off.", APP_NAME)}
                    </p>
                    <div class="hero-cta-group">
                        <a href="#download" class="hero-cta" onclick={anchor_link(&config, "hero-download", "#download")}>{"Download free"}</a>
                        <a href="#demo" class="hero-secondary" onclick={anchor_link(&config, "hero-demo", "#demo")}>{"See the demo"}</a>
                    </div>
                    <div class="hero-stats">
                        <div class="stat">
                            <span class="stat-number"><Counter target={38} suffix="%" /></span>
                            <span class="stat-label">{"average cost reduction"}</span>
                        </div>
                        <div class="stat">
                            <span class="stat-number"><Counter target={1250} suffix="+" /></span>
                            <span class="stat-label">{"clusters analyzed"}</span>
                        </div>
                        <div class="stat">
                            <span class="stat-number"><Counter target={2400000} prefix="$" /></span>
                            <span class="stat-label">{"saved per year"}</span>
                        </div>
                    </div>
                    <div class="terminal">
                        <TypedCode text={DEMO_COMMAND} class={classes!("code-demo")} />
                    </div>
                </div>
            </section>

            <section id="features" class="features-section">
                <h2 class="section-title animate-on-scroll">{"Everything you need to stop overpaying"}</h2>
                <div class="features-grid">
                    { for FEATURES.iter().map(|f| html! {
                        <div class="feature-card animate-on-scroll">
                            <div class="feature-icon">{f.icon}</div>
                            <h3>{f.title}</h3>
                            <p>{f.body}</p>
                        </div>
                    }) }
                </div>
            </section>

            <section id="demo" class="demo-section">
                <h2 class="section-title animate-on-scroll">{"What a typical analysis finds"}</h2>
                if data_source == Some(DataSource::Fallback) {
                    <p class="demo-note">{"Showing sample figures while live demo data is unavailable."}</p>
                }
                <div class="charts-grid">
                    <ChartCanvas id={COST_TRENDS} title="Monthly cost: current vs optimized" />
                    <ChartCanvas id={UTILIZATION} title="Resource utilization" />
                    <ChartCanvas id={EFFICIENCY} title="Efficiency by category" />
                    <ChartCanvas id={SAVINGS} title="Savings by month" />
                </div>
            </section>

            <section id="analysis" class="analysis-section">
                <h2 class="section-title animate-on-scroll">{"Inside a cluster report"}</h2>
                <div class="charts-grid">
                    <ChartCanvas id={NODE_UTILIZATION} title="Node utilization" />
                    <ChartCanvas id={COST_DISTRIBUTION} title="Where the money goes" />
                    <ChartCanvas id={SAVINGS_BREAKDOWN} title="Savings breakdown" />
                </div>
            </section>

            <section id="docs" class="docs-section">
                <h2 class="section-title animate-on-scroll">{"Up and running in three commands"}</h2>
                <DocsTabs />
            </section>

            <section id="download" class="download-section">
                <h2 class="section-title animate-on-scroll">{"Get the container"}</h2>
                <p>{"Pull the image directly:"}</p>
                <CodeBlock code={config.docker_pull_command()} />
                <p>{"Or leave your email and we will send setup instructions along with release notes."}</p>
                <DownloadForm />
            </section>

            <section id="pricing" class="pricing-section">
                <h2 class="section-title animate-on-scroll">{"Pricing"}</h2>
                <div class="pricing-grid">
                    { for PLANS.iter().map(|p| html! {
                        <div class={classes!("pricing-card", "animate-on-scroll", p.featured.then_some("featured"))}>
                            <h3>{p.name}</h3>
                            <div class="price">{p.price}</div>
                            <p>{p.blurb}</p>
                        </div>
                    }) }
                </div>
            </section>

            <section id="contact" class="contact-section">
                <h2 class="section-title animate-on-scroll">{"Talk to us"}</h2>
                <ContactForm />
            </section>

            <footer class="footer">
                <div class="footer-content">
                    <div class="footer-newsletter">
                        <h4>{"Cost tips, once a month"}</h4>
                        <NewsletterForm />
                    </div>
                    <p class="copyright">{format!("© {} {}. All rights reserved.", year, APP_NAME)}</p>
                </div>
            </footer>

            <style>
                {r#"
                    .animate-on-scroll {
                        opacity: 0;
                        transform: translateY(30px);
                        transition: opacity 0.6s ease, transform 0.6s ease;
                    }

                    .animate-on-scroll.animated {
                        opacity: 1;
                        transform: translateY(0);
                    }

                    .hero {
                        position: relative;
                        min-height: 90vh;
                        overflow: hidden;
                        display: flex;
                        align-items: center;
                        padding: 8rem 2rem 4rem;
                    }

                    .hero-background {
                        position: absolute;
                        inset: 0;
                        background: linear-gradient(135deg, #f0fdf4 0%, #ffffff 60%);
                        z-index: -1;
                        will-change: transform;
                    }

                    .hero-stats {
                        display: flex;
                        gap: 3rem;
                        margin: 2.5rem 0;
                    }

                    .stat-number {
                        font-size: 2.5rem;
                        font-weight: 700;
                        color: #7FB069;
                    }

                    .terminal {
                        background: #1a202c;
                        color: #e2e8f0;
                        border-radius: 8px;
                        padding: 1.25rem;
                        font-family: 'Fira Code', monospace;
                        white-space: pre;
                        min-height: 7rem;
                    }

                    section {
                        padding: 5rem 2rem;
                        max-width: 1200px;
                        margin: 0 auto;
                    }

                    .features-grid, .pricing-grid {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
                        gap: 1.5rem;
                    }

                    .charts-grid {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(420px, 1fr));
                        gap: 2rem;
                    }

                    .demo-note {
                        color: #718096;
                        font-style: italic;
                    }

                    .pricing-card.featured {
                        border: 2px solid #7FB069;
                    }

                    .tabs .tab.active {
                        border-bottom: 2px solid #7FB069;
                        color: #6BA055;
                    }

                    .command-content {
                        display: none;
                    }

                    .command-content.active {
                        display: block;
                    }

                    .copy-button.copied {
                        background: #7FB069;
                        color: white;
                    }

                    @media (max-width: 768px) {
                        .hero-stats {
                            flex-direction: column;
                            gap: 1.5rem;
                        }

                        .charts-grid {
                            grid-template-columns: 1fr;
                        }
                    }
                "#}
            </style>
        </div>
    }
}
