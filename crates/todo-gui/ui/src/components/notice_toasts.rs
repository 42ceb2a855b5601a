use todo_core::NoticeKind;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use crate::app::Toast;

#[derive(Properties, PartialEq)]
pub struct NoticeToastsProps {
  pub toasts:     Vec<Toast>,
  pub on_dismiss: Callback<u64>
}

#[function_component(NoticeToasts)]
pub fn notice_toasts(
  props: &NoticeToastsProps
) -> Html {
  html! {
      <div class="toasts">
          {
              for props.toasts.iter().map(|toast| {
                  let id = toast.id;
                  let on_dismiss = props.on_dismiss.clone();
                  let class = match toast.notice.kind {
                      NoticeKind::Success => "toast",
                      NoticeKind::Failure => "toast failure",
                  };
                  html! {
                      <div key={id} class={class}>
                          <span>{ &toast.notice.message }</span>
                          <button type="button" class="btn" onclick={move |_| on_dismiss.emit(id)}>
                              { "Close" }
                          </button>
                      </div>
                  }
              })
          }
      </div>
  }
}
