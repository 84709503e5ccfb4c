use chrono::{Local, NaiveDate};
use gloo_timers::callback::Timeout;
use log::info;
use shared::calendar::{self, CalendarMonth};
use shared::validation;
use shared::form::ACKNOWLEDGE_DELAY_MS;
use shared::{
    ContactReceipt, Field, FitnessPass, FormController, PassOption, Step, SubmissionState,
    SubmitError, PASS_OPTIONS,
};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::date_picker::DatePicker;
use crate::config;
use crate::transport::ContactTransport;

#[derive(Properties, PartialEq)]
pub struct ContactSectionProps {
    #[prop_or_else(config::contact_transport)]
    pub transport: ContactTransport,
}

pub enum ContactMsg {
    Input(Field, String),
    Focus(Option<Field>),
    SelectPass(FitnessPass),
    ToggleCalendar,
    CloseCalendar,
    ShowMonth(CalendarMonth),
    PickDate(NaiveDate),
    Next,
    Back,
    Submit,
    Finished(Result<ContactReceipt, SubmitError>),
    Acknowledge,
}

/// Two-step membership request form.
pub struct ContactSection {
    form: FormController,
    focused: Option<Field>,
    calendar_open: bool,
    month: CalendarMonth,
    // Dropping the component cancels the pending reset.
    reset_timer: Option<Timeout>,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl Component for ContactSection {
    type Message = ContactMsg;
    type Properties = ContactSectionProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            form: FormController::new(),
            focused: None,
            calendar_open: false,
            month: CalendarMonth::containing(today()),
            reset_timer: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ContactMsg::Input(field, value) => {
                self.form.update_field(field, &value);
                true
            }
            ContactMsg::Focus(field) => {
                self.focused = field;
                true
            }
            ContactMsg::SelectPass(pass) => {
                self.form.select_pass(pass);
                true
            }
            ContactMsg::ToggleCalendar => {
                self.calendar_open = !self.calendar_open;
                true
            }
            ContactMsg::CloseCalendar => {
                self.calendar_open = false;
                true
            }
            ContactMsg::ShowMonth(month) => {
                self.month = month;
                true
            }
            ContactMsg::PickDate(date) => {
                if self.form.select_date(date, today()) {
                    self.calendar_open = false;
                }
                true
            }
            ContactMsg::Next => {
                self.form.next_step();
                true
            }
            ContactMsg::Back => {
                self.form.prev_step();
                true
            }
            ContactMsg::Submit => {
                if let Some(request) = self.form.submit() {
                    info!("Submitting membership request");
                    self.calendar_open = false;
                    let transport = ctx.props().transport.clone();
                    ctx.link().send_future(async move {
                        ContactMsg::Finished(transport.send(request).await)
                    });
                }
                true
            }
            ContactMsg::Finished(result) => {
                let accepted = result.is_ok();
                if self.form.finish_submission(result) && accepted {
                    let link = ctx.link().clone();
                    self.reset_timer = Some(Timeout::new(ACKNOWLEDGE_DELAY_MS, move || {
                        link.send_message(ContactMsg::Acknowledge);
                    }));
                }
                true
            }
            ContactMsg::Acknowledge => {
                self.reset_timer = None;
                if self.form.acknowledge() {
                    self.month = CalendarMonth::containing(today());
                    self.focused = None;
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            ContactMsg::Submit
        });

        html! {
            <section id="contact" class="contact-section">
                <style>
                {r#".contact-section {
                    padding: 6rem 1.5rem;
                    display: flex;
                    justify-content: center;
                }
                .contact-card {
                    width: 100%;
                    max-width: 640px;
                    background: rgba(20, 20, 20, 0.85);
                    border: 1px solid rgba(59, 130, 246, 0.2);
                    border-radius: 16px;
                    padding: 2.5rem;
                }
                .progress { display: flex; align-items: center; gap: 0.75rem; margin-bottom: 2rem; }
                .progress-dot {
                    width: 2.25rem; height: 2.25rem; border-radius: 50%;
                    display: flex; align-items: center; justify-content: center;
                    background: rgba(255, 255, 255, 0.08); color: #aaa;
                }
                .progress-dot.active { background: #3b82f6; color: #fff; }
                .progress-bar { flex: 1; height: 2px; background: rgba(255, 255, 255, 0.1); }
                .progress-bar.filled { background: #3b82f6; }
                .field { position: relative; margin-bottom: 1.25rem; }
                .field input, .field textarea, .date-trigger {
                    width: 100%;
                    padding: 0.9rem 1rem;
                    background: rgba(255, 255, 255, 0.05);
                    border: 1px solid rgba(255, 255, 255, 0.1);
                    border-radius: 10px;
                    color: #fff;
                    text-align: left;
                }
                .field.focused input, .field.focused textarea { border-color: #3b82f6; }
                .field.has-error input, .field.has-error textarea, .field.has-error .date-trigger { border-color: #ef4444; }
                .field-error { color: #f87171; font-size: 0.85rem; margin-top: 0.4rem; }
                .submit-error { background: rgba(239, 68, 68, 0.1); color: #fca5a5; padding: 0.75rem 1rem; border-radius: 10px; margin-bottom: 1rem; }
                .calendar-backdrop { position: fixed; inset: 0; z-index: 10; }
                .date-picker {
                    position: absolute; z-index: 11; margin-top: 0.5rem; padding: 1rem;
                    background: #1a1a1a; border: 1px solid rgba(59, 130, 246, 0.3); border-radius: 12px;
                }
                .date-picker-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 0.75rem; }
                .date-picker-grid { display: grid; grid-template-columns: repeat(7, 2.25rem); gap: 0.25rem; text-align: center; }
                .weekday { color: #888; font-size: 0.75rem; }
                .day { padding: 0.4rem 0; border-radius: 6px; cursor: pointer; }
                .day.past { color: #555; cursor: not-allowed; }
                .day.today { border: 1px solid #3b82f6; }
                .day.selected { background: #3b82f6; color: #fff; }
                .pass-options { display: grid; gap: 0.75rem; }
                .pass-option { border: 1px solid rgba(255, 255, 255, 0.1); border-radius: 12px; padding: 1rem; cursor: pointer; }
                .pass-option.selected { border-color: #3b82f6; background: rgba(59, 130, 246, 0.08); }
                .pass-option ul { margin: 0.5rem 0 0; padding-left: 1.2rem; color: #bbb; font-size: 0.85rem; }
                .form-actions { display: flex; gap: 0.75rem; justify-content: space-between; margin-top: 1.5rem; }
                .form-actions button { padding: 0.9rem 1.6rem; border-radius: 10px; border: none; cursor: pointer; }
                .primary-button { background: linear-gradient(45deg, #3b82f6, #06b6d4); color: #fff; }
                .primary-button:disabled { opacity: 0.6; cursor: wait; }
                .secondary-button { background: rgba(255, 255, 255, 0.08); color: #fff; }
                .contact-success { text-align: center; padding: 2rem 0; }
                "#}
                </style>
                <div class="contact-card">
                    <h2>{"Join the club"}</h2>
                    if self.form.state() == SubmissionState::Submitted {
                        { self.view_success() }
                    } else {
                        { self.view_progress() }
                        if let Some(error) = self.form.submit_error() {
                            <div class="submit-error">{ error }</div>
                        }
                        <form {onsubmit} novalidate={true}>
                            {
                                match self.form.step() {
                                    Step::One => self.view_step_one(ctx),
                                    Step::Two => self.view_step_two(ctx),
                                }
                            }
                        </form>
                    }
                </div>
            </section>
        }
    }
}

impl ContactSection {
    fn view_progress(&self) -> Html {
        let on_two = self.form.step() == Step::Two;
        html! {
            <div class="progress">
                <div class="progress-dot active">{"1"}</div>
                <div class={classes!("progress-bar", on_two.then_some("filled"))}></div>
                <div class={classes!("progress-dot", on_two.then_some("active"))}>{"2"}</div>
            </div>
        }
    }

    fn view_success(&self) -> Html {
        let message = self
            .form
            .receipt()
            .map(|receipt| receipt.message.clone())
            .unwrap_or_else(|| "Thanks! We will contact you shortly.".to_string());
        html! {
            <div class="contact-success">
                <h3>{"Request received"}</h3>
                <p>{ message }</p>
            </div>
        }
    }

    fn view_step_one(&self, ctx: &Context<Self>) -> Html {
        let next = ctx.link().callback(|e: MouseEvent| {
            e.prevent_default();
            ContactMsg::Next
        });
        html! {
            <>
                <h3>{"Personal Information"}</h3>
                { self.text_input(ctx, Field::FullName, "text", "Full Name") }
                { self.text_input(
                    ctx,
                    Field::Phone,
                    "tel",
                    "Phone Number (international: +33123456789 or local: 0123456789)",
                ) }
                <div class="form-actions">
                    <span></span>
                    <button type="button" class="primary-button" onclick={next}>{"Continue"}</button>
                </div>
            </>
        }
    }

    fn view_step_two(&self, ctx: &Context<Self>) -> Html {
        let back = ctx.link().callback(|e: MouseEvent| {
            e.prevent_default();
            ContactMsg::Back
        });
        let submitting = self.form.is_submitting();
        html! {
            <>
                <h3>{"Membership Details"}</h3>
                { self.view_date_field(ctx) }
                { self.text_input(ctx, Field::CinNumber, "text", "ID Number (CIN)") }
                <div class={classes!("field", self.form.errors().contains(Field::FitnessPass).then_some("has-error"))}>
                    <div class="pass-options">
                        { for PASS_OPTIONS.iter().map(|option| self.view_pass_option(ctx, option)) }
                    </div>
                    { self.field_error(Field::FitnessPass) }
                </div>
                { self.view_notes_field(ctx) }
                <div class="form-actions">
                    <button type="button" class="secondary-button" onclick={back} disabled={submitting}>{"Back"}</button>
                    <button type="submit" class="primary-button" disabled={submitting}>
                        { if submitting { "Sending..." } else { "Submit" } }
                    </button>
                </div>
            </>
        }
    }

    fn view_date_field(&self, ctx: &Context<Self>) -> Html {
        let toggle = ctx.link().callback(|e: MouseEvent| {
            e.prevent_default();
            ContactMsg::ToggleCalendar
        });
        let label = match calendar::format_for_display(&self.form.data().date) {
            shown if shown.is_empty() => "Select your visit date".to_string(),
            shown => shown,
        };
        html! {
            <div class={classes!("field", self.form.errors().contains(Field::Date).then_some("has-error"))}>
                <button type="button" class="date-trigger" onclick={toggle}>{ label }</button>
                if self.calendar_open {
                    <div class="calendar-backdrop" onclick={ctx.link().callback(|_| ContactMsg::CloseCalendar)}></div>
                    <DatePicker
                        month={self.month}
                        today={today()}
                        selected={self.form.selected_date()}
                        on_pick={ctx.link().callback(ContactMsg::PickDate)}
                        on_month={ctx.link().callback(ContactMsg::ShowMonth)}
                    />
                }
                { self.field_error(Field::Date) }
            </div>
        }
    }

    fn view_pass_option(&self, ctx: &Context<Self>, option: &'static PassOption) -> Html {
        let selected = self.form.data().fitness_pass == Some(option.pass);
        let pass = option.pass;
        let onclick = ctx.link().callback(move |_: MouseEvent| ContactMsg::SelectPass(pass));
        html! {
            <div class={classes!("pass-option", selected.then_some("selected"))} {onclick}>
                <div class="pass-title">
                    <span class="pass-icon">{ option.icon }</span>
                    <strong>{ option.label }</strong>
                    <span class="pass-price">{ option.price }</span>
                </div>
                <p>{ option.description }</p>
                if selected {
                    <ul>
                        { for option.features.iter().map(|feature| html! { <li>{ *feature }</li> }) }
                    </ul>
                }
            </div>
        }
    }

    fn view_notes_field(&self, ctx: &Context<Self>) -> Html {
        let oninput = ctx.link().callback(|e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            ContactMsg::Input(Field::AdditionalInfo, area.value())
        });
        html! {
            <div class={classes!(
                "field",
                (self.focused == Some(Field::AdditionalInfo)).then_some("focused"),
                self.form.errors().contains(Field::AdditionalInfo).then_some("has-error")
            )}>
                <textarea
                    id={Field::AdditionalInfo.name()}
                    name={Field::AdditionalInfo.name()}
                    rows="3"
                    maxlength={validation::MAX_NOTES_LEN.to_string()}
                    value={self.form.data().additional_info.clone()}
                    {oninput}
                    onfocus={ctx.link().callback(|_: FocusEvent| ContactMsg::Focus(Some(Field::AdditionalInfo)))}
                    onblur={ctx.link().callback(|_: FocusEvent| ContactMsg::Focus(None))}
                    placeholder="Additional information (optional)"
                />
                { self.field_error(Field::AdditionalInfo) }
            </div>
        }
    }

    fn text_input(&self, ctx: &Context<Self>, field: Field, input_type: &'static str, placeholder: &'static str) -> Html {
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            ContactMsg::Input(field, input.value())
        });
        let onfocus = ctx.link().callback(move |_: FocusEvent| ContactMsg::Focus(Some(field)));
        let onblur = ctx.link().callback(|_: FocusEvent| ContactMsg::Focus(None));
        html! {
            <div class={classes!(
                "field",
                (self.focused == Some(field)).then_some("focused"),
                self.form.errors().contains(field).then_some("has-error")
            )}>
                <input
                    type={input_type}
                    id={field.name()}
                    name={field.name()}
                    value={self.form.data().value(field).to_string()}
                    maxlength={max_len(field).to_string()}
                    {oninput}
                    {onfocus}
                    {onblur}
                    placeholder={placeholder}
                />
                { self.field_error(field) }
            </div>
        }
    }

    fn field_error(&self, field: Field) -> Html {
        match self.form.errors().get(field) {
            Some(message) => html! { <p class="field-error">{ message }</p> },
            None => html! {},
        }
    }
}

fn max_len(field: Field) -> usize {
    match field {
        Field::FullName => validation::MAX_NAME_LEN,
        Field::Phone => validation::MAX_PHONE_LEN,
        Field::CinNumber => validation::MAX_CIN_LEN,
        _ => validation::MAX_NOTES_LEN,
    }
}
