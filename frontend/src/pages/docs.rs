use yew::prelude::*;

use crate::components::copy_button::CodeBlock;
use crate::config::SiteConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocsTab {
    Install,
    Analyze,
    Optimize,
}

impl DocsTab {
    pub const ALL: [DocsTab; 3] = [DocsTab::Install, DocsTab::Analyze, DocsTab::Optimize];

    pub fn key(&self) -> &'static str {
        match self {
            DocsTab::Install => "install",
            DocsTab::Analyze => "analyze",
            DocsTab::Optimize => "optimize",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DocsTab::Install => "Install",
            DocsTab::Analyze => "Analyze",
            DocsTab::Optimize => "Optimize",
        }
    }

    pub fn commands(&self, config: &SiteConfig) -> Vec<String> {
        let image = format!("{}/{}:{}", config.docker_registry, config.docker_image, config.docker_tag);
        match self {
            DocsTab::Install => vec![config.docker_pull_command()],
            DocsTab::Analyze => vec![
                "az login".to_string(),
                format!(
                    "docker run --rm -v ~/.azure:/root/.azure {} analyze --resource-group <rg> --cluster <aks-cluster>",
                    image
                ),
            ],
            DocsTab::Optimize => vec![format!(
                "docker run --rm -v ~/.azure:/root/.azure {} optimize --resource-group <rg> --cluster <aks-cluster> --dry-run",
                image
            )],
        }
    }
}

/// Class lists for a tab and its content pane; only the active pair is `active`.
pub fn tab_classes(tab: DocsTab, active: DocsTab) -> (Classes, Classes) {
    let on = (tab == active).then_some("active");
    (classes!("tab", on), classes!("command-content", on))
}

#[function_component(DocsTabs)]
pub fn docs_tabs() -> Html {
    let config = use_context::<SiteConfig>().unwrap_or_default();
    let active = use_state(|| DocsTab::Install);

    html! {
        <div class="docs-tabs">
            <div class="tabs">
                { for DocsTab::ALL.iter().map(|tab| {
                    let (tab_class, _) = tab_classes(*tab, *active);
                    let onclick = {
                        let active = active.clone();
                        let tab = *tab;
                        Callback::from(move |_: MouseEvent| active.set(tab))
                    };
                    html! {
                        <button class={tab_class} data-tab={tab.key()} {onclick}>{tab.title()}</button>
                    }
                }) }
            </div>
            { for DocsTab::ALL.iter().map(|tab| {
                let (_, content_class) = tab_classes(*tab, *active);
                html! {
                    <div class={content_class} data-content={tab.key()}>
                        { for tab.commands(&config).into_iter().map(|cmd| html! { <CodeBlock code={cmd} /> }) }
                    </div>
                }
            }) }
        </div>
    }
}
