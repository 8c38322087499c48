use html_flow::prelude::*;

pub fn flowified() -> Document<()> {
    let mut doc = Document::new();
    doc.root()
            .html()
                .attr_lang("en")
                .head()
                    .title()
                        .text("Tea & cakes")
                    .close() // title
                .close() // head
                .body()
                    .pre()
                        .text(concat!("line one\n",
                            "  line two"))
                    .close() // pre
                    .textarea()
                        .text(concat!("first\n",
                            "second"))
                    .close() // textarea
                    .noscript()
                        .raw("<p>enable js</p>")
                    .close() // noscript
                    .template()
                        .attr_id("row")
                        .p()
                            .text("inside")
                        .close() // p
                    .close() // template
                    .element("svg")
                        .attr("xmlns:xlink", "http://www.w3.org/1999/xlink")
                        .element("use")
                            .attr("xlink:href", "#a")
                        .close() // use
                    .close() // svg
                    .comment("done")
                .close() // body
            .close() // html
        ;
    doc
}
