//! Chat-style console for typing commands and reading responses.

use assistant_contract::ExecutionResult;
use command_grammar::CommandGenerator;
use leptos::*;

use crate::context::{use_assistant, TranscriptEntry};

const DEFAULT_CONTEXT: &str = "dashboard";

#[component]
/// Command input, transcript, and contextual suggestions for the current page.
pub fn AssistantConsole() -> impl IntoView {
    let assistant = use_assistant();
    let draft = create_rw_signal(String::new());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let text = draft.get_untracked();
        draft.set(String::new());
        assistant.submit(text);
    };

    let suggestions = move || {
        // Re-read after every exchange since navigation changes the page context.
        assistant.transcript.track();
        let context = assistant
            .current_page()
            .unwrap_or_else(|| DEFAULT_CONTEXT.to_string());
        CommandGenerator.generate_contextual_commands(&context)
    };

    view! {
        <section class="assistant-console" data-ai-target="assistant.console">
            <ol class="assistant-transcript" aria-live="polite">
                <For
                    each=move || assistant.transcript.get().into_iter().enumerate()
                    key=|(index, _)| *index
                    children=move |(_, entry)| view! { <TranscriptRow entry=entry/> }
                />
            </ol>
            <form class="assistant-input" on:submit=on_submit>
                <input
                    type="text"
                    name="assistant-command"
                    placeholder="Ask the assistant"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                    disabled=move || assistant.busy.get()
                />
                <button type="submit" disabled=move || assistant.busy.get()>
                    "Send"
                </button>
            </form>
            <ul class="assistant-suggestions">
                {move || {
                    suggestions()
                        .into_iter()
                        .map(|text| {
                            let command = text.clone();
                            view! {
                                <li>
                                    <button
                                        type="button"
                                        disabled=move || assistant.busy.get()
                                        on:click=move |_| assistant.submit(command.clone())
                                    >
                                        {text}
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </section>
    }
}

#[component]
fn TranscriptRow(entry: TranscriptEntry) -> impl IntoView {
    match entry {
        TranscriptEntry::User { text, intent } => view! {
            <li class="assistant-entry" data-role="user" data-intent=intent.as_str()>
                {text}
            </li>
        }
        .into_view(),
        TranscriptEntry::Assistant(result) => view! { <ResultRow result=result/> }.into_view(),
    }
}

#[component]
fn ResultRow(result: ExecutionResult) -> impl IntoView {
    let assistant = use_assistant();
    let status = if result.success { "ok" } else { "error" };
    let follow_ups = result
        .actions
        .into_iter()
        .map(|action| {
            let suggestion = action.clone();
            view! {
                <button
                    type="button"
                    data-action=action.action
                    data-icon=action.icon.unwrap_or_default()
                    disabled=move || assistant.busy.get()
                    on:click=move |_| assistant.submit_suggestion(&suggestion)
                >
                    {action.label}
                </button>
            }
        })
        .collect_view();

    view! {
        <li class="assistant-entry" data-role="assistant" data-status=status>
            <p>{result.message}</p>
            <div class="assistant-follow-ups">{follow_ups}</div>
        </li>
    }
}
