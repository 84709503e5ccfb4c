use chrono::NaiveDate;
use shared::calendar::CalendarMonth;
use yew::prelude::*;

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

#[derive(Properties, PartialEq)]
pub struct DatePickerProps {
    pub month: CalendarMonth,
    pub today: NaiveDate,
    pub selected: Option<NaiveDate>,
    pub on_pick: Callback<NaiveDate>,
    pub on_month: Callback<CalendarMonth>,
}

#[function_component]
pub fn DatePicker(props: &DatePickerProps) -> Html {
    let DatePickerProps { month, today, selected, on_pick, on_month } = props;

    let show_previous = {
        let on_month = on_month.clone();
        let previous = month.previous();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_month.emit(previous);
        })
    };
    let show_next = {
        let on_month = on_month.clone();
        let next = month.next();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_month.emit(next);
        })
    };

    html! {
        <div class="date-picker">
            <div class="date-picker-header">
                <button type="button" class="month-nav" onclick={show_previous}>{"‹"}</button>
                <span class="month-label">{ month.label() }</span>
                <button type="button" class="month-nav" onclick={show_next}>{"›"}</button>
            </div>
            <div class="date-picker-grid">
                { for WEEKDAYS.iter().map(|day| html! { <div class="weekday">{ *day }</div> }) }
                { for (0..month.leading_blanks()).map(|_| html! { <div class="day blank"></div> }) }
                { for month.days(*today, *selected).into_iter().map(|day| {
                    let onclick = (!day.is_past).then(|| {
                        let on_pick = on_pick.clone();
                        Callback::from(move |_: MouseEvent| on_pick.emit(day.date))
                    });
                    html! {
                        <div
                            class={classes!(
                                "day",
                                day.is_past.then_some("past"),
                                day.is_today.then_some("today"),
                                day.is_selected.then_some("selected")
                            )}
                            {onclick}
                        >
                            { day.day }
                        </div>
                    }
                }) }
            </div>
        </div>
    }
}
