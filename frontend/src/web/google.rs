//! Google Identity Services 封装
//!
//! `index.html` 同步加载 `https://accounts.google.com/gsi/client`，
//! 这里负责初始化并把官方按钮渲染到指定容器中。
//! 用户完成授权后，GIS 回调中的 `credential` 原样交给调用方。

use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// GIS 回调参数
    type CredentialResponse;

    #[wasm_bindgen(method, getter)]
    fn credential(this: &CredentialResponse) -> Option<String>;

    #[wasm_bindgen(catch, js_namespace = ["google", "accounts", "id"], js_name = initialize)]
    fn gsi_initialize(config: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["google", "accounts", "id"], js_name = renderButton)]
    fn gsi_render_button(parent: &web_sys::HtmlElement, options: &JsValue) -> Result<(), JsValue>;
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

/// 初始化 GIS 并在 `container` 中渲染登录按钮
///
/// 脚本未加载（如离线或被拦截）时返回错误。
pub fn render_button(
    container: &web_sys::HtmlElement,
    client_id: &str,
    on_credential: impl Fn(Option<String>) + 'static,
) -> Result<(), JsValue> {
    let callback = Closure::<dyn Fn(CredentialResponse)>::new(move |resp: CredentialResponse| {
        on_credential(resp.credential());
    });

    let config = Object::new();
    set(&config, "client_id", &JsValue::from_str(client_id))?;
    set(&config, "callback", callback.as_ref())?;
    gsi_initialize(&config)?;

    // GIS 在页面生命周期内持有回调
    callback.forget();

    let options = Object::new();
    set(&options, "theme", &JsValue::from_str("outline"))?;
    set(&options, "size", &JsValue::from_str("large"))?;
    set(&options, "text", &JsValue::from_str("signin_with"))?;
    set(&options, "locale", &JsValue::from_str("pt-BR"))?;
    gsi_render_button(container, &options)
}
